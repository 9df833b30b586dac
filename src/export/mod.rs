//! PNG encoding, naming and ZIP bundling of rendered cards.

pub mod artifact;
pub mod bundle;
/// Sequential and rayon-parallel export.
pub mod pipeline;
