use crate::foundation::core::PoemMeta;
use crate::layout::paginate::Page;

/// One fully composed card, ready for rasterization.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Card {
    /// Display-formatted date.
    pub date: String,
    pub title: String,
    pub author: String,
    pub body_text: String,
    /// `"i / N"` page indicator; present only when the poem spans several cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_label: Option<String>,
}

/// Format `YYYY-MM-DD` as `YYYY. MM. DD`.
///
/// Anything that is not three `-`-separated segments is returned unchanged.
pub fn format_display_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [y, m, d] => format!("{y}. {m}. {d}"),
        _ => date.to_string(),
    }
}

/// Page indicator for page `index` (0-based) of `total_pages`, if one should be shown.
pub fn footer_label(index: usize, total_pages: usize) -> Option<String> {
    (total_pages > 1).then(|| format!("{} / {}", index + 1, total_pages))
}

pub fn compose_card(page: &Page, meta: PoemMeta<'_>) -> Card {
    Card {
        date: format_display_date(meta.date),
        title: meta.title.to_string(),
        author: meta.author.to_string(),
        body_text: page.content.clone(),
        footer_label: footer_label(page.index, page.total_pages),
    }
}

pub fn compose_cards(pages: &[Page], meta: PoemMeta<'_>) -> Vec<Card> {
    pages.iter().map(|p| compose_card(p, meta)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/card.rs"]
mod tests;
