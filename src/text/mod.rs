//! Text measurement and Parley layout.

/// Parley-backed layout engine and font loading.
pub mod engine;
/// The measurement seam used by header sizing and pagination.
pub mod metrics;
