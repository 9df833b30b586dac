use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::export::artifact::{ExportArtifact, bundle_filename};
use crate::foundation::error::{PoemcardError, PoemcardResult};

/// Result of an export: a lone PNG, or a ZIP of every card's PNG in page order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutput {
    Single(ExportArtifact),
    Bundle {
        filename: String,
        archive_bytes: Vec<u8>,
        /// Entry names in archive order.
        entries: Vec<String>,
    },
}

impl ExportOutput {
    pub fn filename(&self) -> &str {
        match self {
            Self::Single(a) => &a.filename,
            Self::Bundle { filename, .. } => filename,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Single(a) => &a.image_bytes,
            Self::Bundle { archive_bytes, .. } => archive_bytes,
        }
    }

    /// Write the output file into `dir`, creating it if needed.
    pub fn save(&self, dir: impl AsRef<Path>) -> PoemcardResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(self.filename());
        std::fs::write(&path, self.bytes())
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes().len(), "export saved");
        Ok(path)
    }
}

/// Pack artifacts into a ZIP named after `stem`. Entries are stored uncompressed, PNG data
/// does not deflate further.
pub fn bundle_artifacts(stem: &str, artifacts: &[ExportArtifact]) -> PoemcardResult<ExportOutput> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let mut entries = Vec::with_capacity(artifacts.len());
    for a in artifacts {
        zip.start_file(a.filename.as_str(), options)
            .map_err(|e| PoemcardError::export(format!("start entry '{}': {e}", a.filename)))?;
        zip.write_all(&a.image_bytes)
            .map_err(|e| PoemcardError::export(format!("write entry '{}': {e}", a.filename)))?;
        entries.push(a.filename.clone());
    }

    let archive_bytes = zip
        .finish()
        .map_err(|e| PoemcardError::export(format!("finish archive: {e}")))?
        .into_inner();

    Ok(ExportOutput::Bundle {
        filename: bundle_filename(stem),
        archive_bytes,
        entries,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/bundle.rs"]
mod tests;
