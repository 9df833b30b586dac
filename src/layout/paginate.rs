use crate::foundation::error::PoemcardResult;
use crate::layout::style::FontSpec;
use crate::text::metrics::TextMetrics;

/// A contiguous run of body lines assigned to one card.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Page {
    /// 0-based position in the page sequence.
    pub index: usize,
    /// Original lines joined with `\n`.
    pub content: String,
    pub total_pages: usize,
}

/// Split `body` into pages whose measured height stays within `available_height`.
///
/// Lines are the atomic unit: a source line is never split across pages, only whole lines are
/// grouped. Packing is greedy and forward-only. Each line is tentatively appended to the
/// current page and the page is re-measured; when a non-empty page would overflow, the page
/// is closed and the line starts the next one. A line that alone is taller than the budget
/// still gets its own page.
///
/// An empty body yields no pages. Measurement failures are the only errors.
#[tracing::instrument(skip(body, font, metrics), fields(body_len = body.len()))]
pub fn paginate(
    body: &str,
    available_height: f32,
    width: f32,
    font: &FontSpec,
    metrics: &mut dyn TextMetrics,
) -> PoemcardResult<Vec<Page>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut contents = Vec::<String>::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_height = 0.0f32;

    for line in body.split('\n') {
        current.push(line);
        let tentative = metrics.measure_height(&current.join("\n"), width, font)?;

        if tentative > available_height && current.len() > 1 {
            current.pop();
            tracing::debug!(
                page = contents.len(),
                lines = current.len(),
                height = current_height,
                "page full"
            );
            contents.push(current.join("\n"));
            current.clear();
            current.push(line);
            current_height = metrics.measure_height(line, width, font)?;
        } else {
            current_height = tentative;
        }

        if current.len() == 1 && current_height > available_height {
            tracing::debug!(
                height = current_height,
                budget = available_height,
                "line taller than the page budget; placing it alone"
            );
        }
    }

    if !current.is_empty() {
        contents.push(current.join("\n"));
    }

    let total_pages = contents.len();
    Ok(contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| Page {
            index,
            content,
            total_pages,
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/paginate.rs"]
mod tests;
