//! Card rasterization.

/// Renderer trait and frame type.
pub mod backend;
/// `vello_cpu` renderer.
pub mod cpu;
