//! Card geometry, header sizing and body pagination.

pub mod header;
/// Greedy line-atomic pagination.
pub mod paginate;
/// Card frame, typography and color configuration.
pub mod style;
