//! Page compositing: one footer overlay per page

use crate::layout::FooterLayout;
use crate::renderer::FooterRenderer;
use crate::schema::FooterItem;
use crate::Result;
use pdf_core::{PdfDocument, PdfFont};
use std::path::Path;
use tracing::{debug, info};

/// Font and geometry shared by every page's footer
#[derive(Debug, Clone)]
pub struct FooterStyle {
    pub font: PdfFont,
    pub layout: FooterLayout,
}

impl FooterStyle {
    pub fn new(font: PdfFont, font_size: f32) -> Self {
        Self {
            font,
            layout: FooterLayout::default().with_font_size(font_size),
        }
    }
}

/// Stamp a footer on every page of an open document
///
/// `progress` is called with `(page, total)` after each page is merged.
/// Returns the number of pages processed.
pub fn apply_footer<F>(
    doc: &mut PdfDocument,
    items: &[FooterItem],
    style: FooterStyle,
    mut progress: F,
) -> Result<usize>
where
    F: FnMut(usize, usize),
{
    let total = doc.page_count();
    let font = doc.add_font(style.font);
    let renderer = FooterRenderer::new(items, font).with_layout(style.layout);

    for page in 1..=total {
        let page_box = doc.page_box(page)?;
        let overlay = renderer.render(doc, page_box, page, total)?;
        doc.merge_overlay(page, overlay)?;
        debug!(page, total, "footer applied");
        progress(page, total);
    }

    Ok(total)
}

/// Read `input`, stamp a footer on every page and write `output`
///
/// The input is read fully before anything is written, so `output` may
/// name the same file.
pub fn add_footer_to_pdf<P, Q, F>(
    input: P,
    output: Q,
    items: &[FooterItem],
    style: FooterStyle,
    progress: F,
) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(usize, usize),
{
    let input = input.as_ref();
    let output = output.as_ref();

    let mut doc = PdfDocument::open(input)?;
    let pages = apply_footer(&mut doc, items, style, progress)?;
    doc.save(output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        pages,
        "footer written"
    );
    Ok(pages)
}
