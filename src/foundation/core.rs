use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{PoemcardError, PoemcardResult};

/// A submitted poem: the only user input of a generation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoemInput {
    /// Calendar date, normally `YYYY-MM-DD`.
    pub date: String,
    /// Poem title (plain text).
    #[serde(default)]
    pub title: String,
    /// Author line (plain text).
    #[serde(default)]
    pub author: String,
    /// Multi-line body; literal `\n` line breaks are significant.
    pub body: String,
}

impl PoemInput {
    /// Build an input from its four fields.
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            author: author.into(),
            body: body.into(),
        }
    }

    /// Parse a poem from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> PoemcardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PoemcardError::serde(format!("parse poem JSON: {e}")))
    }

    /// Parse a poem from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PoemcardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PoemcardError::validation(format!("open poem JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Borrow the header metadata.
    pub fn meta(&self) -> PoemMeta<'_> {
        PoemMeta {
            date: &self.date,
            title: &self.title,
            author: &self.author,
        }
    }
}

/// Header fields of a poem, borrowed from a [`PoemInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoemMeta<'a> {
    /// Raw (unformatted) date string.
    pub date: &'a str,
    /// Title line.
    pub title: &'a str,
    /// Author line.
    pub author: &'a str,
}

/// Straight-alpha RGBA8 color used by card styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiplied channel bytes, as stored in render surfaces.
    pub fn to_premul_bytes(self) -> [u8; 4] {
        let a16 = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
