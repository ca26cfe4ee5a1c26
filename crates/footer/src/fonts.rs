//! Font selection
//!
//! Footer fonts are requested by family name. A TrueType file is used when
//! one is given explicitly or found as `<name>.ttf` in a search directory;
//! otherwise the name maps onto one of the standard PDF fonts.

use crate::{FooterError, Result};
use pdf_core::{PdfFont, StandardFont, TrueTypeFont};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_FONT_NAME: &str = "Arial";

/// Map a font family name onto a standard PDF font
///
/// Matching is case-insensitive. Unknown names fall back to Helvetica.
pub fn standard_font_for(name: &str) -> StandardFont {
    match name.trim().to_lowercase().as_str() {
        "times new roman" | "georgia" | "times" | "times-roman" => StandardFont::TimesRoman,
        "courier new" | "courier" => StandardFont::Courier,
        // Arial, Verdana, Tahoma, Calibri and the Devanagari legacy faces
        // (Preeti, Ganesh, Kantipur) all render with Helvetica
        _ => StandardFont::Helvetica,
    }
}

/// Resolves a font name to the font drawn in the footer
#[derive(Debug, Clone, Default)]
pub struct FontResolver {
    font_file: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always embed this TrueType file. Failing to load it is an error.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Look for `<name>.ttf` (lowercase) in this directory
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    pub fn resolve(&self, name: &str) -> Result<PdfFont> {
        if let Some(path) = &self.font_file {
            return load_truetype(name, path);
        }

        let file_name = format!("{}.ttf", name.trim().to_lowercase());
        for dir in &self.search_dirs {
            let candidate = dir.join(&file_name);
            if !candidate.is_file() {
                continue;
            }
            match load_truetype(name, &candidate) {
                Ok(font) => return Ok(font),
                Err(e) => warn!(path = %candidate.display(), error = %e, "ignoring font file"),
            }
        }

        let font = standard_font_for(name);
        info!(requested = name, font = font.base_font(), "using standard font");
        Ok(PdfFont::Standard(font))
    }
}

fn load_truetype(name: &str, path: &Path) -> Result<PdfFont> {
    let data = std::fs::read(path).map_err(|e| {
        FooterError::FontError(format!("Failed to read font {}: {}", path.display(), e))
    })?;
    let font = TrueTypeFont::from_ttf(name, &data)?;
    debug!(path = %path.display(), name, "loaded TrueType font");
    Ok(PdfFont::TrueType(font))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_font_mapping() {
        assert_eq!(standard_font_for("Arial"), StandardFont::Helvetica);
        assert_eq!(standard_font_for("Verdana"), StandardFont::Helvetica);
        assert_eq!(standard_font_for("Preeti"), StandardFont::Helvetica);
        assert_eq!(standard_font_for("Times New Roman"), StandardFont::TimesRoman);
        assert_eq!(standard_font_for("georgia"), StandardFont::TimesRoman);
        assert_eq!(standard_font_for("Courier New"), StandardFont::Courier);
        assert_eq!(standard_font_for("Comic Sans"), StandardFont::Helvetica);
        assert_eq!(standard_font_for(""), StandardFont::Helvetica);
    }

    #[test]
    fn test_resolve_without_files_uses_standard_font() {
        let resolver = FontResolver::new().with_search_dir("/nonexistent/fonts");
        let font = resolver.resolve("Times New Roman").unwrap();
        assert!(matches!(font, PdfFont::Standard(StandardFont::TimesRoman)));
    }

    #[test]
    fn test_invalid_discovered_font_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("preeti.ttf"), b"not a font").unwrap();

        let resolver = FontResolver::new().with_search_dir(dir.path());
        let font = resolver.resolve("Preeti").unwrap();
        assert!(matches!(font, PdfFont::Standard(StandardFont::Helvetica)));
    }

    const FIXTURE: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../pdf-core/tests/fonts/DejaVuSansMono.ttf"
    );

    #[test]
    fn test_discovered_font_file_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(FIXTURE, dir.path().join("mono.ttf")).unwrap();

        let resolver = FontResolver::new()
            .with_search_dir("/nonexistent/fonts")
            .with_search_dir(dir.path());
        match resolver.resolve("Mono").unwrap() {
            PdfFont::TrueType(font) => assert_eq!(font.name(), "Mono"),
            other => panic!("expected TrueType font, got {other:?}"),
        }
    }

    #[test]
    fn test_font_file_wins_over_search_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("arial.ttf"), b"not a font").unwrap();

        let resolver = FontResolver::new()
            .with_search_dir(dir.path())
            .with_font_file(FIXTURE);
        let font = resolver.resolve("Arial").unwrap();
        assert!(matches!(font, PdfFont::TrueType(_)));
        // Real advances: 1233/2048 em per glyph
        assert!((font.text_width_points("ab", 10.0) - 12.041_016).abs() < 1e-4);
    }

    #[test]
    fn test_explicit_font_file_must_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let resolver = FontResolver::new().with_font_file(&path);
        assert!(resolver.resolve("Arial").is_err());

        let missing = FontResolver::new().with_font_file(dir.path().join("missing.ttf"));
        assert!(matches!(
            missing.resolve("Arial"),
            Err(FooterError::FontError(_))
        ));
    }
}
