use super::*;
use crate::foundation::core::Rgba8Premul;

#[test]
fn png_is_rgb8_with_source_dimensions() {
    let img = RasterImage::new_filled(7, 3, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    let png = encode_png(&img).unwrap();

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
    let rgb = decoded.to_rgb8();
    assert_eq!(rgb.dimensions(), (7, 3));
    assert_eq!(rgb.get_pixel(6, 2).0, [10, 20, 30]);
}

#[test]
fn translucent_pixels_are_unpremultiplied_before_alpha_is_dropped() {
    let img = RasterImage::from_premul_bytes(1, 1, vec![64, 0, 0, 128]).unwrap();
    let rgb = flatten_rgb(&img);
    // (64 * 255 + 64) / 128
    assert_eq!(rgb.get_pixel(0, 0).0, [128, 0, 0]);
}

#[test]
fn empty_images_are_an_encode_error() {
    let err = encode_png(&RasterImage::transparent(0, 5)).unwrap_err();
    assert!(err.to_string().starts_with("encode error:"));
}

#[test]
fn export_constants() {
    assert_eq!(OUTPUT_FILE_NAME, "uma_gen_image.png");
    assert_eq!(OUTPUT_MIME, "image/png");
}
