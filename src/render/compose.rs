//! Background construction and final layer composition.

use crate::assets::decor::{build_faded_line, build_gradient};
use crate::assets::font::{ShapedText, TextBlock};
use crate::effects::composite::{alpha_composite, composite_over_at};
use crate::foundation::core::{RasterImage, Rgba8Premul};
use crate::foundation::error::UmagenResult;
use crate::layout::solver::{BackgroundPlacement, BackgroundPlan, Geometry};
use crate::model::LayoutOptions;
use crate::render::text_layer::TextLayer;

/// Build the output canvas for `plan` from the decoded source image.
pub fn build_background(source: &RasterImage, plan: &BackgroundPlan) -> RasterImage {
    match plan.placement {
        BackgroundPlacement::Gradient { y, height } => {
            let mut canvas = source.clone();
            let gradient = build_gradient(source.width(), height);
            composite_over_at(&mut canvas, &gradient, 0, y);
            canvas
        }
        BackgroundPlacement::LetterboxTrim { crop_from } => {
            let mut canvas = RasterImage::new_filled(
                plan.canvas_width,
                plan.canvas_height,
                Rgba8Premul::opaque_black(),
            );
            match crop_from {
                Some(top) => canvas.paste(&source.crop_rows(top, source.height()), 0, 0),
                None => canvas.paste(source, 0, 0),
            }
            canvas
        }
        BackgroundPlacement::LetterboxExtend => {
            let mut canvas = RasterImage::new_filled(
                plan.canvas_width,
                plan.canvas_height,
                Rgba8Premul::opaque_black(),
            );
            canvas.paste(source, 0, 0);
            canvas
        }
    }
}

/// Rasterize the name, accent line and main text into a transparent canvas-sized layer.
///
/// Draw order: each main line, then the accent line, then the name. Every text draw puts its
/// shadow down first.
pub fn render_text_layer(
    block: &TextBlock,
    name: Option<&ShapedText>,
    opts: &LayoutOptions,
    geometry: &Geometry,
) -> UmagenResult<RasterImage> {
    let plan = &geometry.background;
    if plan.canvas_width == 0 || plan.canvas_height == 0 {
        return Ok(RasterImage::transparent(
            plan.canvas_width,
            plan.canvas_height,
        ));
    }

    let shadow = opts.shadow_enabled.then_some(opts.shadow_offset);
    let mut layer = TextLayer::new(plan.canvas_width, plan.canvas_height)?;

    for (line, y) in block.lines().iter().zip(geometry.line_ys.iter()) {
        layer.draw_text_with_shadow(line, geometry.text_x, *y, shadow);
    }

    if let (Some(placement), Some(name)) = (geometry.name.as_ref(), name) {
        let line = build_faded_line(placement.line_width, placement.line_height);
        layer.paint_image(&line, placement.line_x, placement.line_y)?;
        layer.draw_text_with_shadow(name, placement.name_x, placement.name_y, shadow);
    }

    layer.finish()
}

/// Build the background, render the text layer and composite them.
pub fn compose(
    source: &RasterImage,
    block: &TextBlock,
    name: Option<&ShapedText>,
    opts: &LayoutOptions,
    geometry: &Geometry,
) -> UmagenResult<RasterImage> {
    let canvas = build_background(source, &geometry.background);
    let text_layer = render_text_layer(block, name, opts, geometry)?;
    alpha_composite(&canvas, &text_layer)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
