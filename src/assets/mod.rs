pub(crate) mod decode;
pub(crate) mod decor;
pub(crate) mod font;
