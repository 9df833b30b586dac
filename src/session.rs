use crate::compose::card::{Card, compose_cards};
use crate::export::bundle::ExportOutput;
use crate::export::pipeline::{ExportThreading, export_cards};
use crate::foundation::core::PoemInput;
use crate::foundation::error::PoemcardResult;
use crate::layout::header::compute_header_height;
use crate::layout::paginate::{Page, paginate};
use crate::layout::style::CardStyle;
use crate::render::backend::CardRenderer;
use crate::text::metrics::TextMetrics;

/// Everything one generation produced, handed to export explicitly.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GenerationResult {
    pub input: PoemInput,
    pub header_height: f32,
    /// Body budget per card, after header, paddings and footer reserve.
    pub available_height: f32,
    pub pages: Vec<Page>,
    pub cards: Vec<Card>,
}

/// Measure the header, paginate the body and compose one card per page.
#[tracing::instrument(skip(input, style, metrics), fields(date = %input.date, body_len = input.body.len()))]
pub fn generate(
    input: PoemInput,
    style: &CardStyle,
    metrics: &mut dyn TextMetrics,
) -> PoemcardResult<GenerationResult> {
    style.validate()?;
    let width = style.constraints.content_width();

    let header_height = compute_header_height(input.meta(), width, style, metrics)?;
    let available_height = style.constraints.body_budget(header_height);
    tracing::debug!(header_height, available_height, "card budget");

    let pages = paginate(&input.body, available_height, width, &style.body, metrics)?;
    let cards = compose_cards(&pages, input.meta());

    Ok(GenerationResult {
        input,
        header_height,
        available_height,
        pages,
        cards,
    })
}

/// Export the cards of a finished generation, named after its date.
pub fn export_generation<R, F>(
    result: &GenerationResult,
    make_renderer: F,
    threading: &ExportThreading,
) -> PoemcardResult<ExportOutput>
where
    R: CardRenderer,
    F: Fn() -> PoemcardResult<R> + Sync + Send,
{
    export_cards(&result.cards, &result.input.date, make_renderer, threading)
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
