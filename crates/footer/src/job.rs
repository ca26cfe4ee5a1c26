//! End-to-end footer job

use crate::compositor::{add_footer_to_pdf, FooterStyle};
use crate::export::{is_workbook, temp_pdf_path, WorkbookExporter};
use crate::fonts::FontResolver;
use crate::schema::FooterItem;
use crate::{FooterError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything needed to produce one footed PDF
#[derive(Debug, Clone)]
pub struct FooterJob {
    /// PDF or workbook to read
    pub source: PathBuf,
    pub output: PathBuf,
    /// One item per column
    pub items: Vec<FooterItem>,
    pub font_name: String,
    pub font_size: f32,
    pub fonts: FontResolver,
}

/// Outcome of a successful job
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub output: PathBuf,
    pub pages: usize,
}

impl FooterJob {
    /// `<source stem>_footer.pdf` next to the source
    pub fn default_output(source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{stem}_footer.pdf"))
    }

    /// Check the inputs before any work is done
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(FooterError::MissingSource);
        }
        if self.items.is_empty() {
            return Err(FooterError::NoFooterItems);
        }
        if !self.source.is_file() {
            return Err(FooterError::SourceNotFound(self.source.clone()));
        }
        Ok(())
    }

    /// Run the job, reporting `(page, total)` after each page
    pub fn run<F>(&self, exporter: &dyn WorkbookExporter, progress: F) -> Result<JobSummary>
    where
        F: FnMut(usize, usize),
    {
        self.validate()?;

        // Removed on every exit path, including export failures
        let exported = if is_workbook(&self.source) {
            let pdf = TempFile::new(temp_pdf_path(&self.output));
            exporter.export_sheet(&self.source, 1, pdf.path())?;
            Some(pdf)
        } else {
            None
        };
        let input = exported
            .as_ref()
            .map_or(self.source.as_path(), TempFile::path);

        let font = self.fonts.resolve(&self.font_name)?;
        let style = FooterStyle::new(font, self.font_size);
        let pages = add_footer_to_pdf(input, &self.output, &self.items, style, progress)?;

        info!(output = %self.output.display(), pages, "job finished");
        Ok(JobSummary {
            output: self.output.clone(),
            pages,
        })
    }
}

/// A file removed when dropped
struct TempFile(PathBuf);

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.0.exists() {
            match std::fs::remove_file(&self.0) {
                Ok(()) => debug!(path = %self.0.display(), "removed temporary PDF"),
                Err(e) => debug!(path = %self.0.display(), error = %e, "could not remove temporary PDF"),
            }
        }
    }
}
