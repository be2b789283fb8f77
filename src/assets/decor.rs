//! Procedural decoration bitmaps: the bottom darkening gradient and the faded accent line.

use crate::foundation::core::{RasterImage, Rgba8Premul};

/// Alpha reached just above the bottom row of [`build_gradient`].
pub const GRADIENT_MAX_ALPHA: u8 = 180;
/// Plateau alpha of [`build_faded_line`].
pub const FADED_LINE_MAX_ALPHA: u8 = 204;
/// Fraction of the line width used by each fade ramp.
pub const FADED_LINE_FADE_FRACTION: f64 = 0.15;

/// Vertical transparent-to-black gradient: row `i` has alpha `floor(180 * i / height)`.
///
/// A zero height yields an empty asset.
pub fn build_gradient(width: u32, height: u32) -> RasterImage {
    let mut out = RasterImage::transparent(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let row_len = (width as usize) * 4;
    let bytes = out.as_bytes_mut();
    for i in 0..height {
        let alpha = gradient_alpha(i, height);
        let px = Rgba8Premul::from_straight_rgba(0, 0, 0, alpha).to_array();
        let start = (i as usize) * row_len;
        for dst in bytes[start..start + row_len].chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    out
}

fn gradient_alpha(row: u32, height: u32) -> u8 {
    ((u64::from(GRADIENT_MAX_ALPHA) * u64::from(row)) / u64::from(height)) as u8
}

/// White bar whose alpha ramps 0 → 204 over the first 15% of the width, holds, and ramps back.
///
/// `width <= 0` yields a zero-width asset; the fade width is floored at 1px otherwise.
pub fn build_faded_line(width: i64, height: u32) -> RasterImage {
    if width <= 0 {
        return RasterImage::transparent(0, height);
    }
    let width_u = u32::try_from(width).unwrap_or(u32::MAX);
    let mut out = RasterImage::transparent(width_u, height);
    if height == 0 {
        return out;
    }

    let fade = faded_line_fade_width(width);
    let column: Vec<[u8; 4]> = (0..width)
        .map(|i| {
            let a = faded_line_alpha(i, width, fade);
            Rgba8Premul::from_straight_rgba(255, 255, 255, a).to_array()
        })
        .collect();

    let row_len = (width_u as usize) * 4;
    let bytes = out.as_bytes_mut();
    for row in bytes.chunks_exact_mut(row_len) {
        for (dst, px) in row.chunks_exact_mut(4).zip(&column) {
            dst.copy_from_slice(px);
        }
    }
    out
}

fn faded_line_fade_width(width: i64) -> i64 {
    if width <= 0 {
        return 0;
    }
    ((width as f64 * FADED_LINE_FADE_FRACTION).floor() as i64).max(1)
}

fn faded_line_alpha(i: i64, width: i64, fade: i64) -> u8 {
    let max = i64::from(FADED_LINE_MAX_ALPHA);
    let a = if i < fade {
        max * i / fade
    } else if i > width - fade {
        max * (width - i) / fade
    } else {
        max
    };
    a.clamp(0, max) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decor.rs"]
mod tests;
