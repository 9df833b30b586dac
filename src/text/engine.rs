use std::{borrow::Cow, path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{PoemcardError, PoemcardResult};
use crate::layout::style::FontSpec;
use crate::text::metrics::TextMetrics;

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

impl From<crate::foundation::core::Rgba8> for TextBrushRgba8 {
    fn from(c: crate::foundation::core::Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font bytes whose family has been resolved and is ready for layout.
///
/// Holding a `LoadedFont` is the readiness guarantee for measurement: a
/// [`TextLayoutEngine`] can only be built from one.
#[derive(Clone)]
pub struct LoadedFont {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .finish()
    }
}

impl LoadedFont {
    /// Read and register a TTF/OTF file.
    pub fn from_path(path: impl AsRef<Path>) -> PoemcardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))
            .map_err(|e| PoemcardError::measurement(format!("{e:#}")))?;
        Self::from_bytes(bytes)
    }

    /// Register in-memory font bytes and resolve their primary family name.
    pub fn from_bytes(bytes: Vec<u8>) -> PoemcardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> PoemcardResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        PoemcardError::measurement("no font families registered from font bytes")
    })?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| PoemcardError::measurement("registered font family has no name"))?;
    Ok(name.to_string())
}

/// Stateful helper for building Parley layouts with one registered font.
///
/// Both the measuring side (via [`TextMetrics`]) and the card renderer lay text out through
/// [`TextLayoutEngine::layout_text`], so measured and drawn heights agree by construction.
///
/// Wrapping follows CSS `white-space: pre-wrap; word-break: keep-all`: `\n` is a hard break,
/// soft breaks only happen between word units, and CJK runs are never split per character.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Construct an engine with fresh Parley contexts and `font` registered.
    pub fn new(font: &LoadedFont) -> PoemcardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, font.bytes())?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape, line-break and align `text` at `max_width_px`.
    pub fn layout_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        brush: TextBrushRgba8,
        max_width_px: f32,
    ) -> PoemcardResult<parley::Layout<TextBrushRgba8>> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(PoemcardError::measurement(
                "text size_px must be finite and > 0",
            ));
        }
        if !max_width_px.is_finite() || max_width_px <= 0.0 {
            return Err(PoemcardError::measurement(
                "layout width must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::LineHeight(
            parley::style::LineHeight::FontSizeRelative(font.line_height),
        ));
        builder.push_default(parley::style::StyleProperty::WordBreak(
            parley::style::WordBreakStrength::KeepAll,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

impl TextMetrics for TextLayoutEngine {
    fn measure_height(&mut self, text: &str, width: f32, font: &FontSpec) -> PoemcardResult<f32> {
        // The layout is a scratch value and is dropped before returning.
        let layout = self.layout_text(text, font, TextBrushRgba8::default(), width)?;
        let height = layout.height();
        if !height.is_finite() {
            return Err(PoemcardError::measurement(format!(
                "non-finite layout height for {} bytes of text",
                text.len()
            )));
        }
        Ok(height.max(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
