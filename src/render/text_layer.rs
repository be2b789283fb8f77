use std::sync::Arc;

use crate::assets::font::{ShapedGlyphs, ShapedText};
use crate::foundation::core::RasterImage;
use crate::foundation::error::{UmagenError, UmagenResult};

/// Straight-alpha color of the primary glyphs.
pub const TEXT_RGBA: [u8; 4] = [255, 255, 255, 255];
/// Straight-alpha color of the drop shadow.
pub const SHADOW_RGBA: [u8; 4] = [0, 0, 0, 180];

/// Transparent canvas-sized layer that text and decorations are rasterized into.
pub(crate) struct TextLayer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl TextLayer {
    pub(crate) fn new(width: u32, height: u32) -> UmagenResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| UmagenError::validation("canvas width exceeds 65535"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| UmagenError::validation("canvas height exceeds 65535"))?;
        if w == 0 || h == 0 {
            return Err(UmagenError::render("text layer needs a non-empty canvas"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    /// Draw `text` with its top-left at `(x, y)`; with `shadow_offset` the shadow goes first.
    pub(crate) fn draw_text_with_shadow(
        &mut self,
        text: &ShapedText,
        x: i64,
        y: i64,
        shadow_offset: Option<u32>,
    ) {
        if let Some(offset) = shadow_offset {
            let offset = i64::from(offset);
            self.draw_text(text, x + offset, y + offset, SHADOW_RGBA);
        }
        self.draw_text(text, x, y, TEXT_RGBA);
    }

    pub(crate) fn draw_text(&mut self, text: &ShapedText, x: i64, y: i64, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        let ctx = &mut self.ctx;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

        match &text.glyphs {
            ShapedGlyphs::Outline { layout, font } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((x as f64, y as f64)));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            }
            ShapedGlyphs::Bitmap { cells, scale } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                let s = f64::from(*scale);
                let advance = 8.0 * s;
                for (i, cell) in cells.iter().enumerate() {
                    let cell_x = x as f64 + i as f64 * advance;
                    for (row, bits) in cell.iter().enumerate() {
                        let top = y as f64 + row as f64 * s;
                        for (start, end) in bit_runs(*bits) {
                            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                                cell_x + f64::from(start) * s,
                                top,
                                cell_x + f64::from(end) * s,
                                top + s,
                            ));
                        }
                    }
                }
            }
        }
    }

    /// Paint a premultiplied bitmap with its top-left at `(x, y)`, blended once by its own alpha.
    pub(crate) fn paint_image(&mut self, img: &RasterImage, x: i64, y: i64) -> UmagenResult<()> {
        if img.width() == 0 || img.height() == 0 {
            return Ok(());
        }
        let pixmap = pixmap_from_premul_bytes(img.as_bytes(), img.width(), img.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let ctx = &mut self.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x as f64, y as f64)));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(img.width()),
            f64::from(img.height()),
        ));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Rasterize everything drawn so far into a premultiplied image.
    pub(crate) fn finish(mut self) -> UmagenResult<RasterImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        RasterImage::from_premul_bytes(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

/// Half-open `[start, end)` runs of set bits in a glyph row; bit 0 is the leftmost pixel.
fn bit_runs(bits: u8) -> Vec<(u8, u8)> {
    let mut runs = Vec::new();
    let mut col = 0u8;
    while col < 8 {
        if (bits >> col) & 1 == 0 {
            col += 1;
            continue;
        }
        let start = col;
        while col < 8 && (bits >> col) & 1 == 1 {
            col += 1;
        }
        runs.push((start, col));
    }
    runs
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> UmagenResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| UmagenError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| UmagenError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(UmagenError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_layer.rs"]
mod tests;
