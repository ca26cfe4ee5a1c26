//! Footer item types

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Replaced with the 1-based page number
pub const PAGE_PLACEHOLDER: &str = "{page}";
/// Replaced with the total page count
pub const TOTAL_PLACEHOLDER: &str = "{total}";

/// Separator between the two lines in a `"line 1|line 2"` column argument
const LINE_SEPARATOR: char = '|';

/// One footer column: two lines of text stacked vertically
///
/// Serialized as a two-element array `["line 1", "line 2"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct FooterItem {
    pub line1: String,
    pub line2: String,
}

impl FooterItem {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Both lines with placeholders substituted for one page
    pub fn lines_for_page(&self, page: usize, total: usize) -> (String, String) {
        (
            substitute_placeholders(&self.line1, page, total),
            substitute_placeholders(&self.line2, page, total),
        )
    }
}

impl From<(String, String)> for FooterItem {
    fn from((line1, line2): (String, String)) -> Self {
        Self { line1, line2 }
    }
}

impl From<FooterItem> for (String, String) {
    fn from(item: FooterItem) -> Self {
        (item.line1, item.line2)
    }
}

/// Parse `"line 1|line 2"`. Without a separator the second line is empty.
impl FromStr for FooterItem {
    type Err = Infallible;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        Ok(match arg.split_once(LINE_SEPARATOR) {
            Some((line1, line2)) => Self::new(line1, line2),
            None => Self::new(arg, ""),
        })
    }
}

/// Replace every `{page}` and `{total}` in `text`
pub fn substitute_placeholders(text: &str, page: usize, total: usize) -> String {
    text.replace(PAGE_PLACEHOLDER, &page.to_string())
        .replace(TOTAL_PLACEHOLDER, &total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitute_placeholders() {
        assert_eq!(substitute_placeholders("Page {page} of {total}", 3, 12), "Page 3 of 12");
        assert_eq!(substitute_placeholders("{page}/{page}", 7, 9), "7/7");
        assert_eq!(substitute_placeholders("Approved", 1, 1), "Approved");
        assert_eq!(substitute_placeholders("", 1, 1), "");
    }

    #[test]
    fn test_unknown_braces_untouched() {
        assert_eq!(substitute_placeholders("{date} {Page}", 2, 5), "{date} {Page}");
    }

    #[test]
    fn test_lines_for_page() {
        let item = FooterItem::new("Sheet {page}", "{total} total");
        assert_eq!(
            item.lines_for_page(4, 10),
            ("Sheet 4".to_string(), "10 total".to_string())
        );
    }

    #[test]
    fn test_parse_column_argument() {
        let item: FooterItem = "Prepared by|A. Sharma".parse().unwrap();
        assert_eq!(item, FooterItem::new("Prepared by", "A. Sharma"));

        let item: FooterItem = "Checked by".parse().unwrap();
        assert_eq!(item, FooterItem::new("Checked by", ""));

        // Only the first separator splits
        let item: FooterItem = "a|b|c".parse().unwrap();
        assert_eq!(item, FooterItem::new("a", "b|c"));
    }

    #[test]
    fn test_serializes_as_pair() {
        let item = FooterItem::new("Prepared by", "नाम");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"["Prepared by","नाम"]"#);

        let back: FooterItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
