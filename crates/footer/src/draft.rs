//! Draft persistence
//!
//! The last successful settings are kept as pretty-printed JSON so the next
//! run can start from them:
//!
//! ```json
//! {
//!   "src": "report.xlsx",
//!   "columns": 3,
//!   "font_name": "Arial",
//!   "font_size": 16,
//!   "footers": [["Prepared by", "A. Sharma"], ["Page {page}", "of {total}"], ["", ""]]
//! }
//! ```

use crate::fonts::DEFAULT_FONT_NAME;
use crate::schema::FooterItem;
use crate::Result;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DRAFT_FILE_NAME: &str = "pdf_footer_draft.json";
pub const DEFAULT_COLUMNS: usize = 5;
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

/// Whole sizes are written as integers, so `16.0` is stored as `16`
fn serialize_font_size<S>(size: &f32, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if size.fract() == 0.0 && size.abs() < i32::MAX as f32 {
        serializer.serialize_i32(*size as i32)
    } else {
        serializer.serialize_f32(*size)
    }
}

/// Saved footer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Source path as last entered
    #[serde(default)]
    pub src: String,

    #[serde(default = "default_columns")]
    pub columns: usize,

    #[serde(default = "default_font_name")]
    pub font_name: String,

    #[serde(
        default = "default_font_size",
        serialize_with = "serialize_font_size"
    )]
    pub font_size: f32,

    #[serde(default)]
    pub footers: Vec<FooterItem>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            src: String::new(),
            columns: DEFAULT_COLUMNS,
            font_name: default_font_name(),
            font_size: DEFAULT_FONT_SIZE,
            footers: Vec::new(),
        }
    }
}

impl Draft {
    /// `pdf_footer_draft.json` in the system temp directory
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(DRAFT_FILE_NAME)
    }

    /// Load a draft, or `None` if it is missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no draft loaded");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(draft) => Some(draft),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed draft");
                None
            }
        }
    }

    /// Write the draft as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "draft saved");
        Ok(())
    }

    /// Footer items for exactly `columns` columns
    ///
    /// Missing columns are blank and extra saved items are dropped.
    pub fn footer_items(&self) -> Vec<FooterItem> {
        let mut items = self.footers.clone();
        items.resize(self.columns, FooterItem::default());
        items
    }
}
