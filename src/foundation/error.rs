/// Convenience result type used across poemcard.
pub type PoemcardResult<T> = Result<T, PoemcardError>;

/// Top-level error taxonomy used by the generation and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum PoemcardError {
    /// Invalid user-provided input or style configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Text measurement failed (font not loadable, layout unavailable).
    ///
    /// Aborts the whole generation; no partial page set is produced.
    #[error("measurement error: {0}")]
    Measurement(String),

    /// A single card failed to rasterize or encode; aborts the whole export.
    #[error("rasterization error: {0}")]
    Rasterization(String),

    /// Archive creation or packaging failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PoemcardError {
    /// Build a [`PoemcardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PoemcardError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`PoemcardError::Rasterization`] value.
    pub fn rasterization(msg: impl Into<String>) -> Self {
        Self::Rasterization(msg.into())
    }

    /// Build a [`PoemcardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`PoemcardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
