use crate::compose::card::Card;
use crate::foundation::error::{PoemcardError, PoemcardResult};
use crate::layout::style::{CardStyle, FontSpec, LayoutConstraints};
use crate::render::backend::{CardRenderer, FrameRGBA};
use crate::text::engine::{LoadedFont, TextBrushRgba8, TextLayoutEngine};

/// CPU rasterizer for cards, built on `vello_cpu`.
///
/// Header and footer lines are centered within the content width; the body is drawn
/// start-aligned at the left padding, directly below the header block. A renderer owns its
/// own text engine and pixmap, so it is meant to be created once per worker.
pub struct CpuCardRenderer {
    style: CardStyle,
    painter: GlyphPainter,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

/// Text engine plus the matching `vello_cpu` font, kept apart from the style so drawing only
/// borrows what it paints with.
struct GlyphPainter {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

#[derive(Clone, Copy)]
enum HAlign {
    Start,
    Center,
}

/// Where a text block goes: a column of `width` starting at `left`, top edge at `top`.
#[derive(Clone, Copy)]
struct TextBox {
    left: f32,
    width: f32,
    top: f32,
    align: HAlign,
}

impl TextBox {
    fn in_content(c: &LayoutConstraints, top: f32, align: HAlign) -> Self {
        Self {
            left: c.horizontal_padding,
            width: c.content_width(),
            top,
            align,
        }
    }
}

impl CpuCardRenderer {
    pub fn new(font: &LoadedFont, style: &CardStyle) -> PoemcardResult<Self> {
        style.validate()?;
        let width: u16 = style
            .constraints
            .card_width
            .try_into()
            .map_err(|_| PoemcardError::rasterization("card width exceeds u16"))?;
        let height: u16 = style
            .constraints
            .card_height
            .try_into()
            .map_err(|_| PoemcardError::rasterization("card height exceeds u16"))?;

        let engine = TextLayoutEngine::new(font)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );

        Ok(Self {
            style: style.clone(),
            painter: GlyphPainter { engine, font },
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }
}

impl GlyphPainter {
    /// Lay out and fill `text`; returns the laid-out height.
    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        font: &FontSpec,
        brush: TextBrushRgba8,
        area: TextBox,
    ) -> PoemcardResult<f32> {
        let layout = self
            .engine
            .layout_text(text, font, brush, area.width)
            .map_err(|e| PoemcardError::rasterization(format!("{e}")))?;

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in layout.lines() {
            let shift = match area.align {
                HAlign::Start => 0.0,
                HAlign::Center => ((area.width - line.metrics().advance) / 2.0).max(0.0),
            };
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: area.left + shift + g.x,
                    y: area.top + g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(layout.height())
    }
}

impl CardRenderer for CpuCardRenderer {
    #[tracing::instrument(skip(self, card), fields(footer = ?card.footer_label))]
    fn render_card(&mut self, card: &Card) -> PoemcardResult<FrameRGBA> {
        let style = &self.style;
        let colors = style.colors;
        let c = &style.constraints;
        let painter = &mut self.painter;

        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);

        let bg = colors.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        let mut y = c.padding_top;
        y += painter.draw(
            &mut ctx,
            &card.date,
            &style.date,
            colors.date.into(),
            TextBox::in_content(c, y, HAlign::Center),
        )?;
        y += style.gap_after_date;
        y += painter.draw(
            &mut ctx,
            &card.title,
            &style.title,
            colors.title.into(),
            TextBox::in_content(c, y, HAlign::Center),
        )?;
        y += style.gap_after_title;
        y += painter.draw(
            &mut ctx,
            &card.author,
            &style.author,
            colors.author.into(),
            TextBox::in_content(c, y, HAlign::Center),
        )?;
        y += style.header_margin_bottom;

        if !card.body_text.is_empty() {
            painter.draw(
                &mut ctx,
                &card.body_text,
                &style.body,
                colors.body.into(),
                TextBox::in_content(c, y, HAlign::Start),
            )?;
        }

        if let Some(label) = &card.footer_label {
            let footer_top =
                c.card_height as f32 - style.footer_offset_bottom - style.footer.line_px();
            painter.draw(
                &mut ctx,
                label,
                &style.footer,
                colors.footer.into(),
                TextBox::in_content(c, footer_top, HAlign::Center),
            )?;
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if data.len() != expected {
            return Err(PoemcardError::rasterization(format!(
                "pixmap has {} bytes, expected {expected}",
                data.len()
            )));
        }
        tracing::trace!(body_top = y, "card rasterized");

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
