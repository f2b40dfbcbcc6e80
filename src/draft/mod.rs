pub(crate) mod kv;
pub(crate) mod store;
