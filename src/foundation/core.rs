use crate::foundation::error::{UmagenError, UmagenResult};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque black.
    pub fn opaque_black() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A 2D grid of premultiplied RGBA8 pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl RasterImage {
    /// Allocate an image where every pixel is `fill`.
    pub fn new_filled(width: u32, height: u32, fill: Rgba8Premul) -> Self {
        let px = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(px * 4);
        for _ in 0..px {
            data.extend_from_slice(&fill.to_array());
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a fully transparent image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap already-premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> UmagenResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| UmagenError::validation("image size overflow"))?;
        if data.len() != expected {
            return Err(UmagenError::validation(format!(
                "expected {expected} premultiplied bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha `image` buffer into premultiplied form.
    pub fn from_straight_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Alpha at `(x, y)`, or `None` outside the image.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|p| p[3])
    }

    /// Full-width copy of rows `[y0, y1)`, clamped to the image.
    pub fn crop_rows(&self, y0: u32, y1: u32) -> Self {
        let y1 = y1.min(self.height);
        let y0 = y0.min(y1);
        let row = (self.width as usize) * 4;
        Self {
            width: self.width,
            height: y1 - y0,
            data: self.data[(y0 as usize) * row..(y1 as usize) * row].to_vec(),
        }
    }

    /// Copy `src` into this image with its top-left at `(x, y)`, replacing pixels (no blending).
    ///
    /// Parts of `src` that fall outside this image are clipped.
    pub fn paste(&mut self, src: &RasterImage, x: i64, y: i64) {
        let Some(span) = ClipSpan::new(self, src, x, y) else {
            return;
        };
        let dst_row = (self.width as usize) * 4;
        let src_row = (src.width as usize) * 4;
        let len = span.w * 4;
        for row in 0..span.h {
            let d = (span.dst_y + row) * dst_row + span.dst_x * 4;
            let s = (span.src_y + row) * src_row + span.src_x * 4;
            self.data[d..d + len].copy_from_slice(&src.data[s..s + len]);
        }
    }

    /// Un-premultiply into a straight-alpha `image` buffer.
    pub fn to_straight_rgba(&self) -> image::RgbaImage {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        image::RgbaImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

/// Overlap between a destination image and a source placed at a signed offset.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClipSpan {
    pub(crate) dst_x: usize,
    pub(crate) dst_y: usize,
    pub(crate) src_x: usize,
    pub(crate) src_y: usize,
    pub(crate) w: usize,
    pub(crate) h: usize,
}

impl ClipSpan {
    pub(crate) fn new(dst: &RasterImage, src: &RasterImage, x: i64, y: i64) -> Option<Self> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.width)).min(i64::from(dst.width));
        let y1 = (y + i64::from(src.height)).min(i64::from(dst.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            dst_x: x0 as usize,
            dst_y: y0 as usize,
            src_x: (x0 - x) as usize,
            src_y: (y0 - y) as usize,
            w: (x1 - x0) as usize,
            h: (y1 - y0) as usize,
        })
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
