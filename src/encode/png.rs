use std::io::Cursor;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{UmagenError, UmagenResult};

/// File name a finished card is offered under.
pub const OUTPUT_FILE_NAME: &str = "uma_gen_image.png";
/// Media type of [`encode_png`] output.
pub const OUTPUT_MIME: &str = "image/png";

/// Un-premultiply and drop alpha.
pub fn flatten_rgb(image: &RasterImage) -> image::RgbImage {
    image::DynamicImage::ImageRgba8(image.to_straight_rgba()).to_rgb8()
}

/// Encode a card as an opaque 8-bit RGB PNG.
pub fn encode_png(image: &RasterImage) -> UmagenResult<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(UmagenError::encode(format!(
            "cannot encode an empty {}x{} image",
            image.width(),
            image.height()
        )));
    }
    let rgb = flatten_rgb(image);
    let mut out = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| UmagenError::encode(format!("png encode: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
