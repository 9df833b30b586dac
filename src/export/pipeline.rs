use rayon::prelude::*;

use crate::compose::card::Card;
use crate::export::artifact::{ExportArtifact, artifact_filename, encode_png, file_stem};
use crate::export::bundle::{ExportOutput, bundle_artifacts};
use crate::foundation::error::{PoemcardError, PoemcardResult};
use crate::render::backend::CardRenderer;

/// How card rasterization is scheduled during export.
#[derive(Clone, Debug, Default)]
pub struct ExportThreading {
    pub parallel: bool,
    /// Worker count for the dedicated pool; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// Render, encode and name every card, then package the result.
///
/// `make_renderer` is called once for sequential export and once per worker thread for
/// parallel export. Artifacts keep card order regardless of scheduling. The first failure
/// aborts the export and nothing is bundled.
#[tracing::instrument(skip(cards, make_renderer), fields(cards = cards.len()))]
pub fn export_cards<R, F>(
    cards: &[Card],
    date: &str,
    make_renderer: F,
    threading: &ExportThreading,
) -> PoemcardResult<ExportOutput>
where
    R: CardRenderer,
    F: Fn() -> PoemcardResult<R> + Sync + Send,
{
    if cards.is_empty() {
        return Err(PoemcardError::validation("no cards to export"));
    }

    let stem = file_stem(date);
    let total = cards.len();

    let artifacts = if threading.parallel && total > 1 {
        export_parallel(cards, &stem, &make_renderer, threading.threads)?
    } else {
        let mut renderer = make_renderer()?;
        cards
            .iter()
            .enumerate()
            .map(|(i, card)| render_artifact(&mut renderer, card, &stem, i, total))
            .collect::<PoemcardResult<Vec<_>>>()?
    };

    let out = if total == 1 {
        let mut artifacts = artifacts;
        let single = artifacts
            .pop()
            .ok_or_else(|| PoemcardError::export("internal error: rendered artifact missing"))?;
        ExportOutput::Single(single)
    } else {
        bundle_artifacts(&stem, &artifacts)?
    };

    tracing::info!(filename = out.filename(), cards = total, "export complete");
    Ok(out)
}

fn export_parallel<R, F>(
    cards: &[Card],
    stem: &str,
    make_renderer: &F,
    threads: Option<usize>,
) -> PoemcardResult<Vec<ExportArtifact>>
where
    R: CardRenderer,
    F: Fn() -> PoemcardResult<R> + Sync + Send,
{
    let pool = build_thread_pool(threads)?;
    let total = cards.len();

    pool.install(|| {
        cards
            .par_iter()
            .enumerate()
            .map_init(make_renderer, |worker, (i, card)| match worker {
                Ok(renderer) => render_artifact(renderer, card, stem, i, total),
                Err(e) => Err(PoemcardError::rasterization(format!(
                    "worker renderer setup failed: {e}"
                ))),
            })
            .collect::<PoemcardResult<Vec<_>>>()
    })
}

fn render_artifact<R: CardRenderer>(
    renderer: &mut R,
    card: &Card,
    stem: &str,
    index: usize,
    total: usize,
) -> PoemcardResult<ExportArtifact> {
    let frame = renderer.render_card(card)?;
    let image_bytes = encode_png(&frame)?;
    let filename = artifact_filename(stem, index, total);
    tracing::debug!(%filename, bytes = image_bytes.len(), "card rendered");
    Ok(ExportArtifact {
        filename,
        image_bytes,
    })
}

fn build_thread_pool(threads: Option<usize>) -> PoemcardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PoemcardError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PoemcardError::rasterization(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
