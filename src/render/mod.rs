pub(crate) mod compose;
pub(crate) mod pipeline;
pub(crate) mod text_layer;
