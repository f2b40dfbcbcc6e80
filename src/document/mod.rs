pub(crate) mod edit;
pub(crate) mod image_input;
pub(crate) mod model;
pub(crate) mod normalize;
pub(crate) mod period;
