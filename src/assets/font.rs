use std::path::Path;
use std::sync::Arc;

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts as _};

use crate::foundation::error::{UmagenError, UmagenResult};

/// Side length of a built-in fallback glyph cell, in font units.
pub const BUILTIN_CELL: u32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Where a resolved [`FontHandle`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FontSource {
    /// Font bytes supplied with the request.
    User,
    /// Deployment default font configured on the [`FontProvider`].
    Default,
    /// Built-in 8x8 bitmap font (Basic Latin + Latin-1 only).
    Builtin,
}

/// A font tier that could not be used; resolution fell through to the next tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontWarning {
    /// Tier that failed.
    pub tier: FontSource,
    /// Human-readable reason.
    pub message: String,
}

impl std::fmt::Display for FontWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} font unusable: {}", self.tier, self.message)
    }
}

/// Tagged result of [`FontProvider::resolve`].
#[derive(Debug)]
pub enum FontResolution {
    /// The first available tier produced a handle.
    Resolved {
        /// Resolved handle.
        handle: FontHandle,
        /// Tier it came from.
        source: FontSource,
    },
    /// An earlier tier failed and a later outline font was used.
    Recovered {
        /// Resolved handle.
        handle: FontHandle,
        /// Tier it came from.
        source: FontSource,
        /// Failures of the skipped tiers.
        warnings: Vec<FontWarning>,
    },
    /// No outline font was usable; the built-in bitmap font is used.
    Fallback {
        /// Built-in handle.
        handle: FontHandle,
        /// Failures of the skipped tiers (empty when no font was supplied at all).
        warnings: Vec<FontWarning>,
    },
}

impl FontResolution {
    /// Borrow the resolved handle.
    pub fn handle(&self) -> &FontHandle {
        match self {
            Self::Resolved { handle, .. }
            | Self::Recovered { handle, .. }
            | Self::Fallback { handle, .. } => handle,
        }
    }

    /// Mutably borrow the resolved handle (shaping needs mutable layout contexts).
    pub fn handle_mut(&mut self) -> &mut FontHandle {
        match self {
            Self::Resolved { handle, .. }
            | Self::Recovered { handle, .. }
            | Self::Fallback { handle, .. } => handle,
        }
    }

    /// Tier the handle came from.
    pub fn source(&self) -> FontSource {
        match self {
            Self::Resolved { source, .. } | Self::Recovered { source, .. } => *source,
            Self::Fallback { .. } => FontSource::Builtin,
        }
    }

    /// Failures recorded while resolving.
    pub fn warnings(&self) -> &[FontWarning] {
        match self {
            Self::Resolved { .. } => &[],
            Self::Recovered { warnings, .. } | Self::Fallback { warnings, .. } => warnings,
        }
    }

    /// `true` unless the first available tier succeeded with an outline font.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Resolved { .. })
    }
}

/// Resolves size-bound font handles: user bytes, then the default font, then the built-in font.
#[derive(Clone, Debug, Default)]
pub struct FontProvider {
    default_font: Option<Arc<Vec<u8>>>,
}

impl FontProvider {
    /// Provider with no default font: resolution goes user font → built-in.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Provider with in-memory default font bytes.
    pub fn with_default_font(bytes: Vec<u8>) -> Self {
        Self {
            default_font: Some(Arc::new(bytes)),
        }
    }

    /// Provider whose default font is read from `path` once, up front.
    ///
    /// An unreadable path is reported as a warning and the provider has no default font.
    pub fn from_default_path(path: Option<&Path>) -> (Self, Option<FontWarning>) {
        let Some(path) = path else {
            return (Self::builtin_only(), None);
        };
        match std::fs::read(path) {
            Ok(bytes) => (Self::with_default_font(bytes), None),
            Err(e) => {
                let warning = FontWarning {
                    tier: FontSource::Default,
                    message: format!("read default font '{}': {e}", path.display()),
                };
                tracing::warn!(%warning, "default font unavailable");
                (Self::builtin_only(), Some(warning))
            }
        }
    }

    /// Resolve a handle for `size_px`, falling through tiers on decode failure.
    pub fn resolve(&self, size_px: u32, user_font: Option<&[u8]>) -> FontResolution {
        let mut warnings = Vec::new();

        let tiers = [
            (FontSource::User, user_font),
            (
                FontSource::Default,
                self.default_font.as_deref().map(Vec::as_slice),
            ),
        ];
        for (tier, bytes) in tiers {
            let Some(bytes) = bytes else {
                continue;
            };
            match FontHandle::from_font_bytes(bytes, size_px) {
                Ok(handle) => {
                    return if warnings.is_empty() {
                        FontResolution::Resolved {
                            handle,
                            source: tier,
                        }
                    } else {
                        FontResolution::Recovered {
                            handle,
                            source: tier,
                            warnings,
                        }
                    };
                }
                Err(e) => {
                    let warning = FontWarning {
                        tier,
                        message: e.to_string(),
                    };
                    tracing::warn!(%warning, size_px, "falling back to next font tier");
                    warnings.push(warning);
                }
            }
        }

        tracing::debug!(size_px, "using built-in bitmap font");
        FontResolution::Fallback {
            handle: FontHandle::builtin(size_px),
            warnings,
        }
    }
}

/// A renderer bound to one typeface and one pixel size.
pub struct FontHandle {
    size_px: u32,
    face: FontFace,
}

enum FontFace {
    Outline(OutlineFace),
    Builtin,
}

struct OutlineFace {
    engine: TextLayoutEngine,
    family: String,
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("FontHandle");
        d.field("size_px", &self.size_px);
        match &self.face {
            FontFace::Outline(o) => d
                .field("family", &o.family)
                .field("font_bytes_len", &o.bytes.len()),
            FontFace::Builtin => d.field("family", &"builtin-8x8"),
        };
        d.finish()
    }
}

impl FontHandle {
    /// Build an outline handle from TTF/OTF/TTC bytes.
    pub fn from_font_bytes(bytes: &[u8], size_px: u32) -> UmagenResult<Self> {
        if size_px == 0 {
            return Err(UmagenError::validation("font size must be > 0"));
        }
        let mut engine = TextLayoutEngine::new();
        let (family, index) = engine.register_font(bytes)?;
        let bytes = Arc::new(bytes.to_vec());
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            index,
        );
        Ok(Self {
            size_px,
            face: FontFace::Outline(OutlineFace {
                engine,
                family,
                bytes,
                font,
            }),
        })
    }

    /// Handle backed by the built-in bitmap font.
    pub fn builtin(size_px: u32) -> Self {
        Self {
            size_px,
            face: FontFace::Builtin,
        }
    }

    /// Pixel size this handle is bound to.
    pub fn size_px(&self) -> u32 {
        self.size_px
    }

    /// Whether this is the built-in bitmap font.
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin)
    }

    /// Family name of an outline font.
    pub fn family_name(&self) -> Option<&str> {
        match &self.face {
            FontFace::Outline(o) => Some(o.family.as_str()),
            FontFace::Builtin => None,
        }
    }

    /// Raw bytes of an outline font.
    pub fn font_bytes(&self) -> Option<&[u8]> {
        match &self.face {
            FontFace::Outline(o) => Some(o.bytes.as_slice()),
            FontFace::Builtin => None,
        }
    }

    /// Nearest-neighbour scale of the built-in 8x8 cell for this size.
    pub fn builtin_scale(&self) -> u32 {
        ((self.size_px as f64 / f64::from(BUILTIN_CELL)).round() as u32).max(1)
    }

    /// Shape one line of text and measure its advance width.
    pub fn shape(&mut self, text: &str) -> UmagenResult<ShapedText> {
        let scale = self.builtin_scale();
        match &mut self.face {
            FontFace::Outline(o) => {
                let brush = TextBrushRgba8 {
                    r: 255,
                    g: 255,
                    b: 255,
                    a: 255,
                };
                let layout =
                    o.engine
                        .layout_plain(text, &o.family, self.size_px as f32, brush)?;
                let mut width = 0.0f32;
                for line in layout.lines() {
                    width = width.max(line.metrics().advance);
                }
                Ok(ShapedText {
                    width: f64::from(width),
                    missing_glyphs: 0,
                    glyphs: ShapedGlyphs::Outline {
                        layout,
                        font: o.font.clone(),
                    },
                })
            }
            FontFace::Builtin => {
                let mut missing = 0usize;
                let cells: Vec<[u8; 8]> = text
                    .chars()
                    .map(|ch| {
                        builtin_glyph(ch).unwrap_or_else(|| {
                            missing += 1;
                            builtin_glyph('?').unwrap_or([0; 8])
                        })
                    })
                    .collect();
                if missing > 0 {
                    tracing::warn!(
                        missing,
                        "built-in font has no glyphs for some characters; drawing '?'"
                    );
                }
                let width = f64::from(BUILTIN_CELL * scale) * cells.len() as f64;
                Ok(ShapedText {
                    width,
                    missing_glyphs: missing,
                    glyphs: ShapedGlyphs::Bitmap { cells, scale },
                })
            }
        }
    }
}

fn builtin_glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch))
}

/// One line of text shaped against a [`FontHandle`].
pub struct ShapedText {
    width: f64,
    missing_glyphs: usize,
    pub(crate) glyphs: ShapedGlyphs,
}

pub(crate) enum ShapedGlyphs {
    Outline {
        layout: parley::Layout<TextBrushRgba8>,
        font: vello_cpu::peniko::FontData,
    },
    Bitmap {
        cells: Vec<[u8; 8]>,
        scale: u32,
    },
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("width", &self.width)
            .field("missing_glyphs", &self.missing_glyphs)
            .finish()
    }
}

impl ShapedText {
    /// Measured advance width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Characters the built-in font could not draw (always 0 for outline fonts).
    pub fn missing_glyphs(&self) -> usize {
        self.missing_glyphs
    }
}

/// Main text split into lines and shaped with the text-size handle, in render order.
#[derive(Debug)]
pub struct TextBlock {
    lines: Vec<ShapedText>,
}

impl TextBlock {
    /// Split `text` on `'\n'` and shape each line. An empty string yields one empty line.
    pub fn shape(text: &str, font: &mut FontHandle) -> UmagenResult<Self> {
        let lines = text
            .split('\n')
            .map(|line| font.shape(line.strip_suffix('\r').unwrap_or(line)))
            .collect::<UmagenResult<Vec<_>>>()?;
        Ok(Self { lines })
    }

    /// Shaped lines, top to bottom.
    pub fn lines(&self) -> &[ShapedText] {
        &self.lines
    }

    /// Number of lines (never 0).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Per-line advance widths, top to bottom.
    pub fn line_widths(&self) -> Vec<f64> {
        self.lines.iter().map(ShapedText::width).collect()
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the primary family name with its face index in the
    /// collection (non-zero for later faces of a TTC).
    pub fn register_font(&mut self, font_bytes: &[u8]) -> UmagenResult<(String, u32)> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let (family_id, faces) = families.first().ok_or_else(|| {
            UmagenError::validation("no font families registered from font bytes")
        })?;
        let index = faces.first().map_or(0, |face| face.index());

        let family_name = self
            .font_ctx
            .collection
            .family_name(*family_id)
            .ok_or_else(|| UmagenError::validation("registered font family has no name"))?
            .to_string();
        Ok((family_name, index))
    }

    /// Shape and lay out plain text in a registered family, one line per hard break.
    pub fn layout_plain(
        &mut self,
        text: &str,
        family_name: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> UmagenResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(UmagenError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
