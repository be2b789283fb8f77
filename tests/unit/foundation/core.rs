use super::*;

fn solid(w: u32, h: u32, v: u8) -> RasterImage {
    RasterImage::new_filled(w, h, Rgba8Premul::from_straight_rgba(v, v, v, 255))
}

#[test]
fn from_straight_rgba_premultiplies() {
    let c = Rgba8Premul::from_straight_rgba(255, 255, 255, 204);
    assert_eq!(c.to_array(), [204, 204, 204, 204]);
}

#[test]
fn from_premul_bytes_rejects_len_mismatch() {
    assert!(RasterImage::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn crop_rows_keeps_width_and_clamps() {
    let mut img = solid(3, 4, 10);
    let bottom = solid(3, 1, 99);
    img.paste(&bottom, 0, 3);

    let cropped = img.crop_rows(2, 10);
    assert_eq!(cropped.width(), 3);
    assert_eq!(cropped.height(), 2);
    assert_eq!(cropped.pixel(0, 0), Some([10, 10, 10, 255]));
    assert_eq!(cropped.pixel(0, 1), Some([99, 99, 99, 255]));
}

#[test]
fn paste_clips_negative_and_overflowing_offsets() {
    let mut dst = RasterImage::transparent(4, 4);
    let src = solid(3, 3, 200);

    dst.paste(&src, -2, 2);
    assert_eq!(dst.pixel(0, 2), Some([200, 200, 200, 255]));
    assert_eq!(dst.pixel(0, 3), Some([200, 200, 200, 255]));
    assert_eq!(dst.pixel(1, 2), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 0]));

    dst.paste(&src, 10, 10);
    dst.paste(&src, -3, 0);
    assert_eq!(dst.alpha_at(3, 0), Some(0));
}

#[test]
fn straight_roundtrip_is_exact_for_opaque() {
    let mut rgba = image::RgbaImage::new(2, 1);
    rgba.put_pixel(0, 0, image::Rgba([12, 34, 56, 255]));
    rgba.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));
    let img = RasterImage::from_straight_rgba(rgba.clone());
    assert_eq!(img.to_straight_rgba(), rgba);
}

#[test]
fn unpremultiply_restores_white() {
    let c = Rgba8Premul::from_straight_rgba(255, 255, 255, 180);
    let img = RasterImage::new_filled(1, 1, c);
    let straight = img.to_straight_rgba();
    assert_eq!(straight.get_pixel(0, 0).0, [255, 255, 255, 180]);
}
