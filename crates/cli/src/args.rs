//! Command-line arguments

use clap::Parser;
use footer::{Draft, FontResolver, FooterItem, FooterJob};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pdf-footer")]
#[command(version, about = "Add a multi-column footer to every page of a PDF", long_about = None)]
pub struct Args {
    /// PDF or Excel workbook (.xlsx, .xlsm, .xls)
    pub source: Option<PathBuf>,

    /// Output PDF (defaults to <source stem>_footer.pdf)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Footer column as "line 1|line 2", once per column.
    /// `{page}` and `{total}` are replaced on every page.
    #[arg(short = 'c', long = "column", value_name = "TEXT")]
    pub column: Vec<FooterItem>,

    /// Number of columns (pads or truncates the column list)
    #[arg(short = 'n', long = "columns", value_name = "N")]
    pub columns: Option<usize>,

    /// Font name, e.g. "Arial" or "Times New Roman"
    #[arg(short, long, value_name = "NAME")]
    pub font: Option<String>,

    /// Font size in points
    #[arg(short, long, value_name = "PT")]
    pub size: Option<f32>,

    /// Embed this TrueType font
    #[arg(long, value_name = "PATH")]
    pub font_file: Option<PathBuf>,

    /// Directory searched for <font name>.ttf
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub font_dir: PathBuf,

    /// Draft file remembering the last settings
    #[arg(long, value_name = "PATH", env = "PDF_FOOTER_DRAFT")]
    pub draft: Option<PathBuf>,

    /// Neither load nor save the draft
    #[arg(long)]
    pub no_draft: bool,

    /// Print the current draft and exit
    #[arg(long, conflicts_with = "no_draft")]
    pub show_draft: bool,

    /// Debug logging; `RUST_LOG` takes precedence when set
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn draft_path(&self) -> PathBuf {
        self.draft.clone().unwrap_or_else(Draft::default_path)
    }

    /// Overwrite draft values with those given on the command line
    pub fn apply_to(&self, draft: &mut Draft) {
        if let Some(source) = &self.source {
            draft.src = source.display().to_string();
        }
        if let Some(font) = &self.font {
            draft.font_name = font.clone();
        }
        if let Some(size) = self.size {
            draft.font_size = size;
        }
        if !self.column.is_empty() {
            draft.footers = self.column.clone();
            draft.columns = self.column.len();
        }
        if let Some(columns) = self.columns {
            draft.columns = columns;
        }
    }

    /// Build the job from the merged draft
    pub fn job(&self, draft: &Draft) -> FooterJob {
        let source = PathBuf::from(draft.src.trim());
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| FooterJob::default_output(&source));

        let mut fonts = FontResolver::new().with_search_dir(&self.font_dir);
        if let Some(path) = &self.font_file {
            fonts = fonts.with_font_file(path);
        }

        FooterJob {
            source,
            output,
            items: draft.footer_items(),
            font_name: draft.font_name.clone(),
            font_size: draft.font_size,
            fonts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pdf-footer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_columns() {
        let args = parse(&["in.pdf", "-c", "Prepared by|Ram", "--column", "Page {page}|"]);
        assert_eq!(args.source, Some(PathBuf::from("in.pdf")));
        assert_eq!(
            args.column,
            vec![
                FooterItem::new("Prepared by", "Ram"),
                FooterItem::new("Page {page}", "")
            ]
        );
        assert_eq!(args.font_dir, PathBuf::from("."));
    }

    #[test]
    fn test_command_line_overrides_draft() {
        let mut draft = Draft {
            src: "old.pdf".to_string(),
            columns: 4,
            font_name: "Georgia".to_string(),
            font_size: 11.0,
            footers: vec![FooterItem::new("old", "old")],
        };
        let args = parse(&["new.xlsx", "-s", "9.5", "-c", "a|b", "-c", "c|d"]);
        args.apply_to(&mut draft);

        assert_eq!(draft.src, "new.xlsx");
        assert_eq!(draft.font_name, "Georgia");
        assert_eq!(draft.font_size, 9.5);
        assert_eq!(draft.columns, 2);
        assert_eq!(draft.footers, vec![FooterItem::new("a", "b"), FooterItem::new("c", "d")]);
    }

    #[test]
    fn test_column_count_pads_items() {
        let mut draft = Draft::default();
        let args = parse(&["in.pdf", "-n", "3", "-c", "x|y"]);
        args.apply_to(&mut draft);

        let job = args.job(&draft);
        assert_eq!(job.items.len(), 3);
        assert_eq!(job.items[0], FooterItem::new("x", "y"));
        assert_eq!(job.items[2], FooterItem::default());
    }

    #[test]
    fn test_default_output_next_to_source() {
        let mut draft = Draft::default();
        let args = parse(&["reports/q3.xlsx"]);
        args.apply_to(&mut draft);

        let job = args.job(&draft);
        assert_eq!(job.output, PathBuf::from("reports/q3_footer.pdf"));
        assert_eq!(job.font_name, "Arial");
        assert_eq!(job.font_size, 16.0);
        assert_eq!(job.items.len(), 5);
    }

    #[test]
    fn test_explicit_output() {
        let args = parse(&["in.pdf", "-o", "out/final.pdf"]);
        let mut draft = Draft::default();
        args.apply_to(&mut draft);
        assert_eq!(args.job(&draft).output, PathBuf::from("out/final.pdf"));
    }

    #[test]
    fn test_show_draft_conflicts_with_no_draft() {
        let result = Args::try_parse_from(["pdf-footer", "--show-draft", "--no-draft"]);
        assert!(result.is_err());
    }
}
