//! Umagen renders quote-card captions onto a background image.
//!
//! One call takes encoded background bytes, optional font bytes and a [`LayoutOptions`] value,
//! and produces a composited card:
//!
//! - Decode the background into premultiplied RGBA8
//! - Resolve fonts through a [`FontProvider`] (user font, default font, built-in bitmap font)
//! - Solve the caption [`Geometry`] and draw the name, accent line and main text
//! - Export with [`encode_png`]
//!
//! [`generate`] is the whole pipeline; [`PreparedCard`] splits measuring from rasterizing.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod effects;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod render;

pub use crate::foundation::core::{RasterImage, Rgba8Premul};
pub use crate::foundation::error::{UmagenError, UmagenResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::decor::{build_faded_line, build_gradient};
pub use crate::assets::font::{
    FontHandle, FontProvider, FontResolution, FontSource, FontWarning, ShapedText, TextBlock,
};
pub use crate::effects::composite::alpha_composite;
pub use crate::encode::png::{OUTPUT_FILE_NAME, OUTPUT_MIME, encode_png, flatten_rgb};
pub use crate::layout::solver::{
    BackgroundPlacement, BackgroundPlan, Geometry, NamePlacement, compute_geometry,
    letterbox_height, plan_background,
};
pub use crate::model::{CardConfig, LayoutOptions};
pub use crate::render::compose::{build_background, compose, render_text_layer};
pub use crate::render::pipeline::{Generated, PreparedCard, generate, generate_png};
