//! Footer column geometry
//!
//! The usable width between the side margins is split into equal columns.
//! Each column gets two centered lines: line 2 sits on the bottom margin,
//! line 1 sits above it.

use crate::{FooterError, Result};

/// Margins, line spacing and sizes for the footer band (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterLayout {
    pub left_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    /// Vertical gap between line 2's top and line 1's baseline
    pub line_gap: f64,
    pub line1_size: f32,
    pub line2_size: f32,
}

impl Default for FooterLayout {
    fn default() -> Self {
        Self {
            left_margin: 36.0,
            right_margin: 36.0,
            bottom_margin: 24.0,
            line_gap: 4.0,
            line1_size: 13.0,
            line2_size: 13.0,
        }
    }
}

impl FooterLayout {
    /// Use the same size for both lines
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.line1_size = size;
        self.line2_size = size;
        self
    }

    /// Baseline of the second (lower) line
    pub fn line2_baseline(&self) -> f64 {
        self.bottom_margin + self.line2_size as f64
    }

    /// Baseline of the first (upper) line
    pub fn line1_baseline(&self) -> f64 {
        self.line2_baseline() + self.line2_size as f64 + self.line_gap
    }
}

/// Where one column's two lines are anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPlacement {
    /// Horizontal center of the column
    pub x_center: f64,
    pub width: f64,
    pub y_line1: f64,
    pub y_line2: f64,
}

/// Place `columns` equal-width columns across a page `page_width` wide
pub fn column_placements(
    layout: &FooterLayout,
    page_width: f64,
    columns: usize,
) -> Result<Vec<ColumnPlacement>> {
    if columns == 0 {
        return Err(FooterError::NoColumns);
    }

    let available = page_width - layout.left_margin - layout.right_margin;
    let width = available / columns as f64;
    let y_line1 = layout.line1_baseline();
    let y_line2 = layout.line2_baseline();

    Ok((0..columns)
        .map(|i| ColumnPlacement {
            x_center: layout.left_margin + i as f64 * width + width / 2.0,
            width,
            y_line1,
            y_line2,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_baselines() {
        let layout = FooterLayout::default();
        assert_eq!(layout.line2_baseline(), 37.0);
        assert_eq!(layout.line1_baseline(), 54.0);
    }

    #[test]
    fn test_font_size_moves_baselines() {
        let layout = FooterLayout::default().with_font_size(16.0);
        assert_eq!(layout.line2_baseline(), 40.0);
        assert_eq!(layout.line1_baseline(), 60.0);
    }

    #[test]
    fn test_column_centers() {
        // 612 wide: 540 usable, 4 columns of 135
        let placements = column_placements(&FooterLayout::default(), 612.0, 4).unwrap();
        let centers: Vec<f64> = placements.iter().map(|p| p.x_center).collect();
        assert_eq!(centers, vec![103.5, 238.5, 373.5, 508.5]);
        assert!(placements.iter().all(|p| p.width == 135.0));
    }

    #[test]
    fn test_single_column_is_page_center() {
        let placements = column_placements(&FooterLayout::default(), 500.0, 1).unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].x_center, 250.0);
    }

    #[test]
    fn test_zero_columns_is_an_error() {
        let result = column_placements(&FooterLayout::default(), 612.0, 0);
        assert!(matches!(result, Err(FooterError::NoColumns)));
    }
}
