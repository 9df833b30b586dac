use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PoemcardError, PoemcardResult};

/// Font size and line spacing of one text role on the card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f32,
    /// Line height as a multiple of the font size (CSS unitless `line-height`).
    pub line_height: f32,
}

impl FontSpec {
    pub const fn new(size_px: f32, line_height: f32) -> Self {
        Self {
            size_px,
            line_height,
        }
    }

    /// Height of one laid-out line in pixels.
    pub fn line_px(self) -> f32 {
        self.size_px * self.line_height
    }

    fn validate(self, role: &str) -> PoemcardResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(PoemcardError::validation(format!(
                "{role} font size_px must be finite and > 0"
            )));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(PoemcardError::validation(format!(
                "{role} line_height must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// Fixed visual frame of a card, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConstraints {
    pub card_width: u32,
    pub card_height: u32,
    /// Left and right padding; the content width is what remains.
    pub horizontal_padding: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Vertical space kept free for the page indicator.
    pub footer_reserved_height: f32,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            card_width: 1080,
            card_height: 1350,
            horizontal_padding: 100.0,
            padding_top: 120.0,
            padding_bottom: 120.0,
            footer_reserved_height: 100.0,
        }
    }
}

impl LayoutConstraints {
    /// Width available to header and body text.
    pub fn content_width(&self) -> f32 {
        (self.card_width as f32 - 2.0 * self.horizontal_padding).max(0.0)
    }

    /// Vertical budget left for body text once the header, fixed paddings and the footer
    /// reserve are subtracted from the card height.
    pub fn body_budget(&self, header_height: f32) -> f32 {
        (self.card_height as f32
            - self.padding_top
            - header_height
            - self.footer_reserved_height
            - self.padding_bottom)
            .max(0.0)
    }
}

/// Text colors and background of a card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardColors {
    pub background: Rgba8,
    pub date: Rgba8,
    pub title: Rgba8,
    pub author: Rgba8,
    pub body: Rgba8,
    pub footer: Rgba8,
}

impl Default for CardColors {
    fn default() -> Self {
        Self {
            background: Rgba8::opaque(0x32, 0x32, 0x32),
            date: Rgba8::opaque(0xa0, 0xa0, 0xa0),
            title: Rgba8::opaque(0xff, 0xff, 0xff),
            author: Rgba8::opaque(0xc8, 0xc8, 0xc8),
            body: Rgba8::opaque(0xf2, 0xf2, 0xf2),
            footer: Rgba8::opaque(0x8c, 0x8c, 0x8c),
        }
    }
}

/// Complete visual description of a card: frame, typography, spacing and colors.
///
/// Every field has a default, so a style JSON only needs to list what it overrides:
///
/// ```json
/// { "body": { "size_px": 32.0, "line_height": 1.8 }, "constraints": { "card_height": 1600 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub constraints: LayoutConstraints,
    pub body: FontSpec,
    pub date: FontSpec,
    pub title: FontSpec,
    pub author: FontSpec,
    pub footer: FontSpec,
    pub gap_after_date: f32,
    pub gap_after_title: f32,
    /// Space between the author line and the first body line.
    pub header_margin_bottom: f32,
    /// Distance from the bottom card edge to the bottom of the footer line.
    pub footer_offset_bottom: f32,
    pub colors: CardColors,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            constraints: LayoutConstraints::default(),
            body: FontSpec::new(36.0, 2.0),
            date: FontSpec::new(28.0, 1.5),
            title: FontSpec::new(56.0, 1.4),
            author: FontSpec::new(32.0, 1.5),
            footer: FontSpec::new(28.0, 1.5),
            gap_after_date: 24.0,
            gap_after_title: 24.0,
            header_margin_bottom: 80.0,
            footer_offset_bottom: 60.0,
            colors: CardColors::default(),
        }
    }
}

impl CardStyle {
    /// Parse a style from JSON; absent fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> PoemcardResult<Self> {
        let style: Self = serde_json::from_reader(r)
            .map_err(|e| PoemcardError::serde(format!("parse card style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Parse a style from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PoemcardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PoemcardError::validation(format!("open card style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> PoemcardResult<()> {
        self.body.validate("body")?;
        self.date.validate("date")?;
        self.title.validate("title")?;
        self.author.validate("author")?;
        self.footer.validate("footer")?;

        let c = &self.constraints;
        if c.card_width == 0 || c.card_height == 0 {
            return Err(PoemcardError::validation("card dimensions must be > 0"));
        }
        if c.card_width > u32::from(u16::MAX) || c.card_height > u32::from(u16::MAX) {
            return Err(PoemcardError::validation(
                "card dimensions must fit in 16 bits",
            ));
        }
        let spacing = [
            c.horizontal_padding,
            c.padding_top,
            c.padding_bottom,
            c.footer_reserved_height,
            self.gap_after_date,
            self.gap_after_title,
            self.header_margin_bottom,
            self.footer_offset_bottom,
        ];
        if spacing.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PoemcardError::validation(
                "paddings, gaps and offsets must be finite and >= 0",
            ));
        }
        if c.content_width() <= 0.0 {
            return Err(PoemcardError::validation(
                "horizontal padding leaves no content width",
            ));
        }
        if c.padding_top + c.padding_bottom + c.footer_reserved_height >= c.card_height as f32 {
            return Err(PoemcardError::validation(
                "vertical paddings and footer reserve exceed the card height",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
