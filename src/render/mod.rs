pub(crate) mod backend;
pub(crate) mod html;
pub(crate) mod parallax;
pub(crate) mod presenter;
