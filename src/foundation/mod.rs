/// Poem input, header metadata and color primitives.
pub mod core;
/// Crate-wide error type.
pub mod error;
