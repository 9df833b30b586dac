use crate::foundation::error::PoemcardResult;
use crate::layout::style::FontSpec;

/// Reports how tall a piece of text renders when wrapped at a given width.
///
/// This is the only contact point between pagination and a font engine. Implementations must
/// apply the same wrapping rule as the renderer that draws the final card; any mismatch shows
/// up as overflowing or needlessly split pages.
pub trait TextMetrics {
    /// Height in pixels of `text` laid out at `width` with `font`. Never negative.
    ///
    /// Literal `\n` characters are hard line breaks.
    fn measure_height(&mut self, text: &str, width: f32, font: &FontSpec) -> PoemcardResult<f32>;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &mut M {
    fn measure_height(&mut self, text: &str, width: f32, font: &FontSpec) -> PoemcardResult<f32> {
        (**self).measure_height(text, width, font)
    }
}

/// Deterministic metrics: every line is `line_height_px` tall.
///
/// With `wrap_columns` set, a line of `n` characters occupies `ceil(n / wrap_columns)` rows
/// (at least one). Width and font are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLineMetrics {
    pub line_height_px: f32,
    pub wrap_columns: Option<usize>,
}

impl FixedLineMetrics {
    pub fn new(line_height_px: f32) -> Self {
        Self {
            line_height_px,
            wrap_columns: None,
        }
    }

    pub fn with_wrap_columns(mut self, columns: usize) -> Self {
        self.wrap_columns = Some(columns.max(1));
        self
    }

    fn rows_for(&self, line: &str) -> usize {
        match self.wrap_columns {
            Some(cols) => line.chars().count().div_ceil(cols).max(1),
            None => 1,
        }
    }
}

impl TextMetrics for FixedLineMetrics {
    fn measure_height(&mut self, text: &str, _width: f32, _font: &FontSpec) -> PoemcardResult<f32> {
        let rows: usize = text.split('\n').map(|line| self.rows_for(line)).sum();
        Ok(rows as f32 * self.line_height_px.max(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
