//! Footer rendering

use crate::layout::{column_placements, FooterLayout};
use crate::schema::FooterItem;
use crate::Result;
use pdf_core::{Align, FontHandle, Overlay, PageBox, PdfDocument};

/// Draws footer items onto per-page overlays
pub struct FooterRenderer<'a> {
    items: &'a [FooterItem],
    font: FontHandle,
    layout: FooterLayout,
}

impl<'a> FooterRenderer<'a> {
    /// Create a renderer for `items` using a font already added to the document
    pub fn new(items: &'a [FooterItem], font: FontHandle) -> Self {
        Self {
            items,
            font,
            layout: FooterLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: FooterLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Render the footer for one page
    ///
    /// # Arguments
    /// * `doc` - Document owning the font
    /// * `page_box` - Box of the page the overlay is for
    /// * `page` - 1-based page number substituted for `{page}`
    /// * `total` - Page count substituted for `{total}`
    pub fn render(
        &self,
        doc: &mut PdfDocument,
        page_box: PageBox,
        page: usize,
        total: usize,
    ) -> Result<Overlay> {
        let placements = column_placements(&self.layout, page_box.width(), self.items.len())?;
        let mut overlay = Overlay::new(page_box);

        for (item, placement) in self.items.iter().zip(&placements) {
            let (line1, line2) = item.lines_for_page(page, total);

            doc.set_font(self.font, self.layout.line1_size)?;
            doc.draw_text(
                &mut overlay,
                &line1,
                placement.x_center,
                placement.y_line1,
                Align::Center,
            )?;

            doc.set_font(self.font, self.layout.line2_size)?;
            doc.draw_text(
                &mut overlay,
                &line2,
                placement.x_center,
                placement.y_line2,
                Align::Center,
            )?;
        }

        Ok(overlay)
    }
}
