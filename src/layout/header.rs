use crate::compose::card::format_display_date;
use crate::foundation::core::PoemMeta;
use crate::foundation::error::PoemcardResult;
use crate::layout::style::CardStyle;
use crate::text::metrics::TextMetrics;

/// The three header lines exactly as they are drawn on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Display-formatted date.
    pub date: String,
    pub title: String,
    pub author: String,
}

impl HeaderBlock {
    pub fn from_meta(meta: PoemMeta<'_>) -> Self {
        Self {
            date: format_display_date(meta.date),
            title: meta.title.to_string(),
            author: meta.author.to_string(),
        }
    }
}

/// Measured pieces of a header block, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderMetrics {
    pub date_height: f32,
    pub title_height: f32,
    pub author_height: f32,
}

impl HeaderMetrics {
    /// Natural height of the block including its own gaps and bottom margin.
    pub fn total(&self, style: &CardStyle) -> f32 {
        self.date_height
            + style.gap_after_date
            + self.title_height
            + style.gap_after_title
            + self.author_height
            + style.header_margin_bottom
    }
}

/// Measure each header line at `width` with its own font.
pub fn measure_header(
    header: &HeaderBlock,
    width: f32,
    style: &CardStyle,
    metrics: &mut dyn TextMetrics,
) -> PoemcardResult<HeaderMetrics> {
    Ok(HeaderMetrics {
        date_height: metrics.measure_height(&header.date, width, &style.date)?,
        title_height: metrics.measure_height(&header.title, width, &style.title)?,
        author_height: metrics.measure_height(&header.author, width, &style.author)?,
    })
}

/// Height the header of this particular poem takes on a card.
///
/// Long titles or author lines wrap, so the value depends on the input and is recomputed for
/// every generation.
pub fn compute_header_height(
    meta: PoemMeta<'_>,
    width: f32,
    style: &CardStyle,
    metrics: &mut dyn TextMetrics,
) -> PoemcardResult<f32> {
    let header = HeaderBlock::from_meta(meta);
    let measured = measure_header(&header, width, style, metrics)?;
    Ok(measured.total(style))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/header.rs"]
mod tests;
