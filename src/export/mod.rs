pub(crate) mod assets;
pub(crate) mod flow;
pub(crate) mod offscreen;
pub(crate) mod paginate;
pub(crate) mod pdf;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod text;
