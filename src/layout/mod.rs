pub(crate) mod art;
pub(crate) mod density;
pub(crate) mod generator;
pub(crate) mod model;
