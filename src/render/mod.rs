pub(crate) mod channels;
pub(crate) mod engine;
pub(crate) mod host;
pub(crate) mod mesh;
