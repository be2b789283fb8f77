//! Caption geometry: where the background goes, where each text line, the name and the accent
//! line are drawn.
//!
//! Everything here is a pure function of the source image size, the measured text widths and
//! [`LayoutOptions`]. Float math keeps the operation order of the formulas below; every pixel
//! coordinate is produced with `floor`.

use crate::foundation::math::{floor_px, floor_size};
use crate::model::LayoutOptions;

/// Line height as a multiple of the font size.
pub const LINE_SPACING: f64 = 1.2;
/// Gradient overlay height as a fraction of the source height.
pub const GRADIENT_HEIGHT_FRACTION: f64 = 0.35;
/// Bottom of the text block as a fraction of the canvas height (non-letterbox mode).
pub const TEXT_BOTTOM_FRACTION: f64 = 0.95;

/// How the source image is placed on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackgroundPlacement {
    /// Canvas is a copy of the source with a darkening gradient at the bottom.
    Gradient {
        /// Top row of the gradient overlay.
        y: i64,
        /// Gradient height in rows.
        height: u32,
    },
    /// Canvas keeps the source height; the band's height is trimmed off the image.
    LetterboxTrim {
        /// First source row pasted at the origin, or `None` when the source is too small to trim
        /// and is pasted whole.
        crop_from: Option<u32>,
    },
    /// Canvas grows by the band's height; the source is pasted at the top.
    LetterboxExtend,
}

/// Output canvas plan derived from the source size and options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BackgroundPlan {
    /// Output canvas width.
    pub canvas_width: u32,
    /// Output canvas height.
    pub canvas_height: u32,
    /// Height of the black band (0 without letterbox).
    pub letterbox_height: u32,
    /// Reference Y the letterbox text block is measured from.
    pub text_draw_base_y: i64,
    /// Placement of the source image.
    pub placement: BackgroundPlacement,
}

/// Name label and accent line placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NamePlacement {
    /// Left edge of the name text.
    pub name_x: i64,
    /// Top of the name text.
    pub name_y: i64,
    /// Left edge of the accent line.
    pub line_x: i64,
    /// Top of the accent line.
    pub line_y: i64,
    /// Accent line width (may be <= 0 for degenerate inputs).
    pub line_width: i64,
    /// Accent line height, at least 1.
    pub line_height: u32,
}

/// Every coordinate the compositor needs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Geometry {
    /// Canvas plan.
    pub background: BackgroundPlan,
    /// Shared left edge of all main text lines.
    pub text_x: i64,
    /// Top of the main text block (unfloored).
    pub text_top_y: f64,
    /// Bottom of the main text block (unfloored).
    pub text_bottom_y: f64,
    /// Top of each main text line, in render order.
    pub line_ys: Vec<i64>,
    /// Name and accent line, when the name is shown.
    pub name: Option<NamePlacement>,
}

/// Height of the bottom band for `line_count` main text lines; 0 without letterbox.
pub fn letterbox_height(opts: &LayoutOptions, line_count: usize) -> u32 {
    if !opts.add_letterbox {
        return 0;
    }
    let text_size = f64::from(opts.text_size);
    let name_size = f64::from(opts.name_size);

    let vertical_padding = text_size * 0.5;
    let main_text_height = text_size * LINE_SPACING * line_count as f64;
    let name_band_height = if opts.show_name {
        (name_size * LINE_SPACING) + (name_size * 0.5)
    } else {
        0.0
    };
    floor_size(name_band_height + main_text_height + vertical_padding * 2.0)
}

/// Plan the output canvas for a `width` x `height` source.
pub fn plan_background(
    width: u32,
    height: u32,
    opts: &LayoutOptions,
    line_count: usize,
) -> BackgroundPlan {
    if !opts.add_letterbox {
        let gradient_height = floor_size(f64::from(height) * GRADIENT_HEIGHT_FRACTION);
        return BackgroundPlan {
            canvas_width: width,
            canvas_height: height,
            letterbox_height: 0,
            text_draw_base_y: i64::from(height),
            placement: BackgroundPlacement::Gradient {
                y: i64::from(height) - i64::from(gradient_height),
                height: gradient_height,
            },
        };
    }

    let band = letterbox_height(opts, line_count);
    if opts.trims_top() {
        let crop_height = i64::from(height) - i64::from(band);
        BackgroundPlan {
            canvas_width: width,
            canvas_height: height,
            letterbox_height: band,
            text_draw_base_y: crop_height,
            placement: BackgroundPlacement::LetterboxTrim {
                crop_from: (crop_height > 0).then_some(band),
            },
        }
    } else {
        BackgroundPlan {
            canvas_width: width,
            canvas_height: height.saturating_add(band),
            letterbox_height: band,
            text_draw_base_y: i64::from(height),
            placement: BackgroundPlacement::LetterboxExtend,
        }
    }
}

/// Compute the full caption geometry.
///
/// `line_widths` holds one measured width per main text line (at least one entry for a
/// well-formed block; an empty slice is treated as a single empty line). `name_width` is only
/// used when the name is shown.
pub fn compute_geometry(
    width: u32,
    height: u32,
    line_widths: &[f64],
    name_width: f64,
    opts: &LayoutOptions,
) -> Geometry {
    let line_count = line_widths.len().max(1);
    let background = plan_background(width, height, opts, line_count);

    let canvas_w = f64::from(background.canvas_width);
    let canvas_h = f64::from(background.canvas_height);
    let text_size = f64::from(opts.text_size);
    let name_size = f64::from(opts.name_size);
    let step = text_size * LINE_SPACING;

    let max_line_width = line_widths.iter().copied().fold(0.0f64, f64::max);
    let text_x = floor_px((canvas_w - max_line_width) / 2.0);

    let text_bottom_y = if opts.add_letterbox {
        background.text_draw_base_y as f64 + f64::from(background.letterbox_height)
            - (text_size * 0.5)
    } else {
        floor_px(canvas_h * TEXT_BOTTOM_FRACTION) as f64
    };
    let text_top_y = text_bottom_y - (text_size * LINE_SPACING * line_count as f64);

    let line_ys = (0..line_count)
        .map(|i| floor_px(text_top_y + i as f64 * step))
        .collect();

    let name = opts.show_name.then(|| {
        let name_x = floor_px((canvas_w / 4.0) - (canvas_w * 0.06));
        let line_padding = name_size * 4.0;
        let line_width = floor_px(name_width + line_padding);
        let line_height = floor_size(canvas_h * 0.005).max(1);
        let line_x = floor_px(name_x as f64 + (name_width / 2.0) - (line_width as f64 / 2.0));
        let line_y = floor_px(text_top_y - (name_size * 0.5));
        let name_y = floor_px(line_y as f64 - (name_size * LINE_SPACING));
        NamePlacement {
            name_x,
            name_y,
            line_x,
            line_y,
            line_width,
            line_height,
        }
    });

    tracing::debug!(
        canvas_w = background.canvas_width,
        canvas_h = background.canvas_height,
        letterbox = background.letterbox_height,
        text_x,
        text_top_y,
        "caption geometry"
    );

    Geometry {
        background,
        text_x,
        text_top_y,
        text_bottom_y,
        line_ys,
        name,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
