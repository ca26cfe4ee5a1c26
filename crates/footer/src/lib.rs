//! Footer - multi-column footer overlays for PDF pages
//!
//! This crate provides:
//! - Footer items (two lines per column) with `{page}`/`{total}` placeholders
//! - Column layout arithmetic
//! - Overlay rendering and page compositing
//! - Font-name mapping and TrueType discovery
//! - Draft persistence (JSON)
//! - Workbook-to-PDF export through external office tools
//!
//! # Example
//!
//! ```ignore
//! use footer::{add_footer_to_pdf, FooterItem, FooterStyle};
//! use pdf_core::{PdfFont, StandardFont};
//!
//! let items = vec![
//!     FooterItem::new("Prepared by", "A. Sharma"),
//!     FooterItem::new("Page {page}", "of {total}"),
//! ];
//! let style = FooterStyle::new(PdfFont::Standard(StandardFont::Helvetica), 13.0);
//! let pages = add_footer_to_pdf("in.pdf", "out.pdf", &items, style, |_, _| {})?;
//! ```

mod compositor;
mod draft;
mod export;
mod fonts;
mod job;
mod layout;
mod renderer;
mod schema;

pub use compositor::{add_footer_to_pdf, apply_footer, FooterStyle};
pub use draft::{Draft, DEFAULT_COLUMNS, DEFAULT_FONT_SIZE, DRAFT_FILE_NAME};
pub use export::{
    default_exporter, is_workbook, temp_pdf_path, ExcelAutomation, OfficeConverter,
    WorkbookExporter,
};
pub use fonts::{standard_font_for, FontResolver, DEFAULT_FONT_NAME};
pub use job::{FooterJob, JobSummary};
pub use layout::{column_placements, ColumnPlacement, FooterLayout};
pub use renderer::FooterRenderer;
pub use schema::{substitute_placeholders, FooterItem, PAGE_PLACEHOLDER, TOTAL_PLACEHOLDER};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while adding a footer
#[derive(Debug, Error)]
pub enum FooterError {
    #[error("Please select source file")]
    MissingSource,

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Please set number of columns and fill footer values")]
    NoFooterItems,

    #[error("Footer needs at least one column")]
    NoColumns,

    #[error("Workbook export failed: {0}")]
    Export(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for footer operations
pub type Result<T> = std::result::Result<T, FooterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FooterError::MissingSource.to_string(),
            "Please select source file"
        );
        assert_eq!(
            FooterError::SourceNotFound(PathBuf::from("a.pdf")).to_string(),
            "Source file not found: a.pdf"
        );
    }
}
