//! PDF Core - Low-level PDF manipulation
//!
//! This crate provides functionality for:
//! - Opening and saving PDF documents
//! - Measuring page bounding boxes (with inherited MediaBox)
//! - Standard (base-14) fonts and embedded TrueType fonts
//! - Drawing text onto transparent overlays
//! - Merging overlays onto existing page content
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Overlay, PdfDocument, PdfFont, StandardFont};
//!
//! let mut doc = PdfDocument::open("report.pdf")?;
//! let helvetica = doc.add_font(PdfFont::Standard(StandardFont::Helvetica));
//! doc.set_font(helvetica, 13.0)?;
//!
//! let mut overlay = Overlay::new(doc.page_box(1)?);
//! doc.draw_text(&mut overlay, "Page 1 of 3", 297.6, 24.0, Align::Center)?;
//! doc.merge_overlay(1, overlay)?;
//! doc.save("report_footer.pdf")?;
//! ```

mod document;
mod font;
mod metrics;
mod overlay;
mod text;
mod truetype;

pub use document::{PageBox, PdfDocument};
pub use font::{FontHandle, PdfFont, StandardFont};
pub use overlay::Overlay;
pub use text::TextRun;
pub use truetype::TrueTypeFont;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
