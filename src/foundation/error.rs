/// Convenience result type used across umagen.
pub type UmagenResult<T> = Result<T, UmagenError>;

/// Top-level error taxonomy used by the generation pipeline.
///
/// Font decode problems are not errors: they are reported as
/// [`crate::FontWarning`] values and the pipeline continues with the next font tier.
#[derive(thiserror::Error, Debug)]
pub enum UmagenError {
    /// Invalid user-provided options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Background bytes could not be decoded into a raster image.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Errors while rasterizing or compositing layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding the final image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UmagenError {
    /// Build a [`UmagenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`UmagenError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`UmagenError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`UmagenError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
