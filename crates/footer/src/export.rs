//! Workbook to PDF export through an installed office suite

use crate::{FooterError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

const WORKBOOK_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

/// Converts one worksheet of a workbook into a PDF file
pub trait WorkbookExporter: Send + Sync {
    /// Export worksheet `sheet` (1-based) of `workbook` to `pdf`
    fn export_sheet(&self, workbook: &Path, sheet: u32, pdf: &Path) -> Result<()>;
}

/// True when the path has a spreadsheet extension (case-insensitive)
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Intermediate PDF for an exported workbook: `<output stem>_temp_input.pdf`
pub fn temp_pdf_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}_temp_input.pdf"))
}

/// Exporter for the current platform
pub fn default_exporter() -> Box<dyn WorkbookExporter> {
    if cfg!(windows) {
        Box::new(ExcelAutomation::default())
    } else {
        Box::new(OfficeConverter::default())
    }
}

const EXCEL_SCRIPT: &str = r#"
$ErrorActionPreference = 'Stop'
$excel = New-Object -ComObject Excel.Application
$excel.Visible = $false
$excel.DisplayAlerts = $false
try {
    $book = $excel.Workbooks.Open($env:PDF_FOOTER_WORKBOOK)
    try {
        $book.Worksheets.Item([int]$env:PDF_FOOTER_SHEET).ExportAsFixedFormat(0, $env:PDF_FOOTER_PDF)
    } finally {
        $book.Close($false)
    }
} finally {
    $excel.Quit()
}
"#;

/// Drives Microsoft Excel through PowerShell COM automation
#[derive(Debug, Clone)]
pub struct ExcelAutomation {
    powershell: PathBuf,
}

impl Default for ExcelAutomation {
    fn default() -> Self {
        Self {
            powershell: PathBuf::from("powershell"),
        }
    }
}

impl WorkbookExporter for ExcelAutomation {
    fn export_sheet(&self, workbook: &Path, sheet: u32, pdf: &Path) -> Result<()> {
        // Excel resolves relative paths against its own working directory
        let workbook = absolute(workbook)?;
        let pdf = absolute(pdf)?;

        info!(workbook = %workbook.display(), sheet, "exporting worksheet with Excel");
        let output = Command::new(&self.powershell)
            .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass"])
            .arg("-Command")
            .arg(EXCEL_SCRIPT)
            .env("PDF_FOOTER_WORKBOOK", &workbook)
            .env("PDF_FOOTER_PDF", &pdf)
            .env("PDF_FOOTER_SHEET", sheet.to_string())
            .output();

        check_output(&self.powershell, output)?;
        ensure_exists(&pdf)
    }
}

/// Converts with LibreOffice in headless mode
///
/// LibreOffice prints the whole workbook, so every sheet ends up in the PDF
/// regardless of `sheet`.
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    program: PathBuf,
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new("soffice")
    }
}

impl OfficeConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl WorkbookExporter for OfficeConverter {
    fn export_sheet(&self, workbook: &Path, sheet: u32, pdf: &Path) -> Result<()> {
        // Next to the target so the final rename stays on one filesystem
        let parent = pdf
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let out_dir = tempfile::Builder::new()
            .prefix(".pdf-footer-export")
            .tempdir_in(parent)?;

        info!(workbook = %workbook.display(), sheet, "converting workbook with LibreOffice");
        let output = Command::new(&self.program)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(out_dir.path())
            .arg(workbook)
            .output();
        check_output(&self.program, output)?;

        let stem = workbook.file_stem().unwrap_or_default().to_string_lossy();
        let converted = out_dir.path().join(format!("{stem}.pdf"));
        ensure_exists(&converted)?;
        std::fs::rename(&converted, pdf)?;

        if let Err(e) = out_dir.close() {
            debug!(error = %e, "could not remove export directory");
        }
        Ok(())
    }
}

fn check_output(program: &Path, output: std::io::Result<Output>) -> Result<()> {
    let output = output.map_err(|e| {
        FooterError::Export(format!("failed to start {}: {}", program.display(), e))
    })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(FooterError::Export(format!(
        "{} exited with {}: {}",
        program.display(),
        output.status,
        stderr.trim()
    )))
}

fn ensure_exists(pdf: &Path) -> Result<()> {
    if pdf.is_file() {
        Ok(())
    } else {
        Err(FooterError::Export(format!(
            "no PDF produced at {}",
            pdf.display()
        )))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
