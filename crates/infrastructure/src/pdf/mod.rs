//! Consultation PDF rendering
//!
//! A story of styled paragraphs is built first (pure, deterministic),
//! then laid out onto Letter pages with printpdf. The split keeps the
//! document structure testable without parsing PDF output.

mod composer;
mod styles;

pub use composer::{Paragraph, PdfComposer};
pub use styles::{Alignment, ParagraphStyle};
