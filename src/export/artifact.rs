use std::io::Cursor;

use crate::foundation::error::{PoemcardError, PoemcardResult};
use crate::render::backend::FrameRGBA;

/// One encoded card image and the name it is exported under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    /// PNG file contents.
    pub image_bytes: Vec<u8>,
}

/// Filesystem-safe stem derived from the poem date: `-` becomes `_`.
///
/// `/` is replaced too, so a slash-separated date can never name a subdirectory.
pub fn file_stem(date: &str) -> String {
    date.replace(['-', '/'], "_")
}

/// `{stem}.png` for a lone card, `{stem} ({i+1}).png` for the i-th of several.
pub fn artifact_filename(stem: &str, index: usize, total: usize) -> String {
    if total <= 1 {
        format!("{stem}.png")
    } else {
        format!("{stem} ({}).png", index + 1)
    }
}

/// Name of the archive that bundles a multi-card export.
pub fn bundle_filename(stem: &str) -> String {
    format!("{stem}_poems.zip")
}

/// Encode a premultiplied frame as a straight-alpha PNG.
pub fn encode_png(frame: &FrameRGBA) -> PoemcardResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(PoemcardError::rasterization(format!(
            "frame data has {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| PoemcardError::rasterization("frame buffer does not match dimensions"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PoemcardError::rasterization(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifact.rs"]
mod tests;
