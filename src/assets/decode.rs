use crate::foundation::core::RasterImage;
use crate::foundation::error::{UmagenError, UmagenResult};

/// Decode encoded image bytes (PNG, JPEG, BMP, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> UmagenResult<RasterImage> {
    if bytes.is_empty() {
        return Err(UmagenError::image_decode("background bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| UmagenError::image_decode(format!("decode image from memory: {e}")))?;
    Ok(RasterImage::from_straight_rgba(dyn_img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
