//! Poemcard turns a short poem into fixed-size image cards.
//!
//! A generation measures the header, paginates the body greedily by line and composes one
//! [`Card`] per page. Export rasterizes the cards and returns a single PNG or a ZIP bundle:
//!
//! - Load a [`LoadedFont`] and build a [`TextLayoutEngine`]
//! - Call [`generate`] with a [`PoemInput`] and [`CardStyle`]
//! - Pass the [`GenerationResult`] to [`export_generation`] and [`ExportOutput::save`] it
#![forbid(unsafe_code)]

pub mod compose;
pub mod export;
pub mod foundation;
pub mod layout;
/// Card rasterization backends.
pub mod render;
/// Generation and export entrypoints.
pub mod session;
pub mod text;

pub use crate::compose::card::{Card, compose_card, compose_cards, format_display_date};
pub use crate::export::artifact::{ExportArtifact, encode_png, file_stem};
pub use crate::export::bundle::ExportOutput;
pub use crate::export::pipeline::{ExportThreading, export_cards};
pub use crate::foundation::core::{PoemInput, PoemMeta, Rgba8};
pub use crate::foundation::error::{PoemcardError, PoemcardResult};
pub use crate::layout::header::compute_header_height;
pub use crate::layout::paginate::{Page, paginate};
pub use crate::layout::style::{CardColors, CardStyle, FontSpec, LayoutConstraints};
pub use crate::render::backend::{CardRenderer, FrameRGBA};
pub use crate::render::cpu::CpuCardRenderer;
pub use crate::session::{GenerationResult, export_generation, generate};
pub use crate::text::engine::{LoadedFont, TextLayoutEngine};
pub use crate::text::metrics::{FixedLineMetrics, TextMetrics};

#[cfg(test)]
#[path = "../tests/unit/support/fonts.rs"]
pub(crate) mod test_fonts;
