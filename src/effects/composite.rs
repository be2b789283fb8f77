use crate::foundation::core::{ClipSpan, RasterImage};
use crate::foundation::error::{UmagenError, UmagenResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> UmagenResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(UmagenError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` over `dst` with `src`'s top-left at `(x, y)`; the out-of-bounds part is clipped.
pub fn composite_over_at(dst: &mut RasterImage, src: &RasterImage, x: i64, y: i64) {
    let Some(span) = ClipSpan::new(dst, src, x, y) else {
        return;
    };
    let dst_row = (dst.width() as usize) * 4;
    let src_row = (src.width() as usize) * 4;
    let len = span.w * 4;
    let src_bytes = src.as_bytes();
    let dst_bytes = dst.as_bytes_mut();
    for row in 0..span.h {
        let d = (span.dst_y + row) * dst_row + span.dst_x * 4;
        let s = (span.src_y + row) * src_row + span.src_x * 4;
        for (dp, sp) in dst_bytes[d..d + len]
            .chunks_exact_mut(4)
            .zip(src_bytes[s..s + len].chunks_exact(4))
        {
            let out = over([dp[0], dp[1], dp[2], dp[3]], [sp[0], sp[1], sp[2], sp[3]]);
            dp.copy_from_slice(&out);
        }
    }
}

/// Composite a full-size layer over `dst`, returning a new image. Neither input is modified.
pub fn alpha_composite(dst: &RasterImage, layer: &RasterImage) -> UmagenResult<RasterImage> {
    if dst.width() != layer.width() || dst.height() != layer.height() {
        return Err(UmagenError::render(format!(
            "alpha_composite size mismatch: {}x{} vs {}x{}",
            dst.width(),
            dst.height(),
            layer.width(),
            layer.height()
        )));
    }
    let mut out = dst.clone();
    over_in_place(out.as_bytes_mut(), layer.as_bytes())?;
    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
