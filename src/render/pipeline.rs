use crate::assets::decode::decode_image;
use crate::assets::font::{FontProvider, FontResolution, FontWarning, ShapedText, TextBlock};
use crate::encode::png::encode_png;
use crate::foundation::core::RasterImage;
use crate::foundation::error::UmagenResult;
use crate::layout::solver::{Geometry, compute_geometry};
use crate::model::LayoutOptions;
use crate::render::compose::compose;

/// Everything needed to draw one card, resolved and measured up front.
///
/// Building this decodes the background, resolves both fonts, shapes every line and solves the
/// layout. [`PreparedCard::render`] then only rasterizes.
pub struct PreparedCard {
    source: RasterImage,
    opts: LayoutOptions,
    block: TextBlock,
    name: Option<ShapedText>,
    geometry: Geometry,
    name_font: FontResolution,
    text_font: FontResolution,
}

impl std::fmt::Debug for PreparedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedCard")
            .field("source_w", &self.source.width())
            .field("source_h", &self.source.height())
            .field("lines", &self.block.line_count())
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl PreparedCard {
    /// Decode, resolve fonts, shape and lay out.
    pub fn prepare(
        background: &[u8],
        font: Option<&[u8]>,
        opts: &LayoutOptions,
        provider: &FontProvider,
    ) -> UmagenResult<Self> {
        opts.validate()?;
        let source = decode_image(background)?;

        let mut name_font = provider.resolve(opts.name_size, font);
        let mut text_font = provider.resolve(opts.text_size, font);

        let block = TextBlock::shape(&opts.main_text, text_font.handle_mut())?;
        let name = if opts.show_name {
            Some(name_font.handle_mut().shape(&opts.name_text)?)
        } else {
            None
        };

        let geometry = compute_geometry(
            source.width(),
            source.height(),
            &block.line_widths(),
            name.as_ref().map_or(0.0, ShapedText::width),
            opts,
        );

        Ok(Self {
            source,
            opts: opts.clone(),
            block,
            name,
            geometry,
            name_font,
            text_font,
        })
    }

    /// Solved layout.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Font used for the name.
    pub fn name_font(&self) -> &FontResolution {
        &self.name_font
    }

    /// Font used for the main text.
    pub fn text_font(&self) -> &FontResolution {
        &self.text_font
    }

    /// Rasterize the card.
    pub fn render(&self) -> UmagenResult<RasterImage> {
        compose(
            &self.source,
            &self.block,
            self.name.as_ref(),
            &self.opts,
            &self.geometry,
        )
    }

    /// Rasterize and hand back the rendered image with the layout and font outcomes.
    pub fn into_generated(self) -> UmagenResult<Generated> {
        let image = self.render()?;
        Ok(Generated {
            image,
            geometry: self.geometry,
            name_font: self.name_font,
            text_font: self.text_font,
        })
    }
}

/// Output of [`generate`].
#[derive(Debug)]
pub struct Generated {
    /// Final composited card (premultiplied RGBA8).
    pub image: RasterImage,
    /// Layout used to draw it.
    pub geometry: Geometry,
    /// How the name font was resolved.
    pub name_font: FontResolution,
    /// How the main text font was resolved.
    pub text_font: FontResolution,
}

impl Generated {
    /// All font warnings from both resolutions, name first.
    pub fn warnings(&self) -> impl Iterator<Item = &FontWarning> {
        self.name_font
            .warnings()
            .iter()
            .chain(self.text_font.warnings().iter())
    }

    /// True when either font fell back from the requested tier.
    pub fn is_degraded(&self) -> bool {
        self.name_font.is_degraded() || self.text_font.is_degraded()
    }
}

/// Render a caption card from encoded background bytes and optional font bytes.
///
/// Font problems never fail the call: they degrade through the provider's tiers and are
/// reported on the returned [`Generated`]. Undecodable backgrounds and invalid options are
/// errors.
#[tracing::instrument(
    skip(background, font, opts, provider),
    fields(bg_bytes = background.len(), user_font = font.is_some())
)]
pub fn generate(
    background: &[u8],
    font: Option<&[u8]>,
    opts: &LayoutOptions,
    provider: &FontProvider,
) -> UmagenResult<Generated> {
    let card = PreparedCard::prepare(background, font, opts, provider)?;
    let generated = card.into_generated()?;
    tracing::info!(
        width = generated.image.width(),
        height = generated.image.height(),
        degraded = generated.is_degraded(),
        "card generated"
    );
    Ok(generated)
}

/// [`generate`] followed by PNG export.
pub fn generate_png(
    background: &[u8],
    font: Option<&[u8]>,
    opts: &LayoutOptions,
    provider: &FontProvider,
) -> UmagenResult<(Vec<u8>, Generated)> {
    let generated = generate(background, font, opts, provider)?;
    let png = encode_png(&generated.image)?;
    Ok((png, generated))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
