use super::*;
use crate::assets::font::FontHandle;
use crate::layout::solver::{compute_geometry, plan_background};

fn opts() -> LayoutOptions {
    LayoutOptions {
        name_text: "NAME".to_string(),
        main_text: "HELLO".to_string(),
        ..LayoutOptions::default()
    }
}

fn white(w: u32, h: u32) -> RasterImage {
    RasterImage::new_filled(w, h, Rgba8Premul::from_straight_rgba(255, 255, 255, 255))
}

#[test]
fn gradient_darkens_only_the_bottom_rows() {
    let src = white(10, 10);
    let plan = plan_background(10, 10, &opts(), 1);
    let canvas = build_background(&src, &plan);

    assert_eq!(canvas.width(), 10);
    assert_eq!(canvas.height(), 10);
    assert_eq!(canvas.pixel(0, 0).unwrap(), [255, 255, 255, 255]);
    // Gradient covers rows 7..10; its first row is fully transparent.
    assert_eq!(canvas.pixel(0, 7).unwrap(), [255, 255, 255, 255]);
    assert_eq!(canvas.pixel(5, 9).unwrap(), [135, 135, 135, 255]);
}

#[test]
fn letterbox_extend_adds_black_band() {
    let o = LayoutOptions {
        add_letterbox: true,
        ..opts()
    };
    let src = white(4, 10);
    let plan = plan_background(4, 10, &o, 1);
    let canvas = build_background(&src, &plan);

    assert_eq!(canvas.height(), 10 + 164);
    assert_eq!(canvas.pixel(0, 9).unwrap(), [255, 255, 255, 255]);
    assert_eq!(canvas.pixel(0, 10).unwrap(), [0, 0, 0, 255]);
    assert_eq!(canvas.pixel(3, 173).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn letterbox_trim_crops_band_height_from_the_top() {
    let o = LayoutOptions {
        add_letterbox: true,
        trim_top: true,
        ..opts()
    };
    let mut src = RasterImage::new_filled(1, 300, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    src.paste(
        &RasterImage::new_filled(1, 136, Rgba8Premul::from_straight_rgba(0, 255, 0, 255)),
        0,
        164,
    );

    let plan = plan_background(1, 300, &o, 1);
    let canvas = build_background(&src, &plan);

    assert_eq!(canvas.height(), 300);
    assert_eq!(canvas.pixel(0, 0).unwrap(), [0, 255, 0, 255]);
    assert_eq!(canvas.pixel(0, 135).unwrap(), [0, 255, 0, 255]);
    assert_eq!(canvas.pixel(0, 136).unwrap(), [0, 0, 0, 255]);
    assert_eq!(canvas.pixel(0, 299).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn letterbox_trim_pastes_whole_image_when_too_small() {
    let o = LayoutOptions {
        add_letterbox: true,
        trim_top: true,
        ..opts()
    };
    let src = white(2, 50);
    let plan = plan_background(2, 50, &o, 1);
    let canvas = build_background(&src, &plan);

    assert_eq!(canvas.height(), 50);
    assert_eq!(canvas.pixel(1, 49).unwrap(), [255, 255, 255, 255]);
}

fn layer_for(o: &LayoutOptions) -> RasterImage {
    let mut text_font = FontHandle::builtin(o.text_size);
    let mut name_font = FontHandle::builtin(o.name_size);
    let block = TextBlock::shape(&o.main_text, &mut text_font).unwrap();
    let name = name_font.shape(&o.name_text).unwrap();
    let geometry = compute_geometry(400, 300, &block.line_widths(), name.width(), o);
    render_text_layer(&block, Some(&name), o, &geometry).unwrap()
}

#[test]
fn without_shadow_every_drawn_pixel_is_white() {
    let layer = layer_for(&opts());
    let mut drawn = 0usize;
    for px in layer.as_bytes().chunks_exact(4) {
        if px[3] > 0 {
            drawn += 1;
            assert!(px[..3].iter().all(|c| c.abs_diff(px[3]) <= 1), "{px:?}");
        }
    }
    assert!(drawn > 0);
}

#[test]
fn shadow_adds_dark_pixels() {
    let o = LayoutOptions {
        shadow_enabled: true,
        shadow_offset: 3,
        ..opts()
    };
    let layer = layer_for(&o);
    let dark = layer
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| px[3] > 0 && px[0] < px[3])
        .count();
    assert!(dark > 0);
}

#[test]
fn compose_keeps_canvas_size() {
    let o = opts();
    let mut text_font = FontHandle::builtin(o.text_size);
    let block = TextBlock::shape(&o.main_text, &mut text_font).unwrap();
    let src = white(120, 90);
    let geometry = compute_geometry(120, 90, &block.line_widths(), 0.0, &o);

    let out = compose(&src, &block, None, &o, &geometry).unwrap();
    assert_eq!(out.width(), 120);
    assert_eq!(out.height(), 90);
    assert_eq!(out.pixel(0, 0).unwrap(), [255, 255, 255, 255]);
}

#[test]
fn name_and_its_shadow_are_drawn_over_the_main_text() {
    let o = LayoutOptions {
        name_text: "_".to_string(),
        main_text: "_".to_string(),
        name_size: 8,
        text_size: 8,
        shadow_enabled: true,
        shadow_offset: 2,
        ..LayoutOptions::default()
    };
    let mut text_font = FontHandle::builtin(o.text_size);
    let mut name_font = FontHandle::builtin(o.name_size);
    let block = TextBlock::shape(&o.main_text, &mut text_font).unwrap();
    let name = name_font.shape(&o.name_text).unwrap();

    let mut geometry = compute_geometry(32, 32, &block.line_widths(), name.width(), &o);
    geometry.text_x = 0;
    geometry.line_ys = vec![0];
    // Name's shadow row lands exactly on the main text's underscore row (y = 7).
    let placement = geometry.name.as_mut().unwrap();
    placement.name_x = 0;
    placement.name_y = -2;
    placement.line_width = 0;

    let layer = render_text_layer(&block, Some(&name), &o, &geometry).unwrap();

    // Main text (white) then name shadow (black, alpha 180) on top.
    let px = layer.pixel(5, 7).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[0] < 100 && px[0] > 50, "{px:?}");
    // Name itself stays white.
    assert_eq!(layer.pixel(5, 5).unwrap()[0], 255);
}
