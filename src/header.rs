//! Header components: the column header row and the row header (gutter).
//!
//! Rendering is external; these nodes only track the area they were laid out
//! in and, for the gutter, where each row label sits and whether it is
//! highlighted.

use serde::Serialize;

use crate::scroll::RowPlacement;
use crate::types::{HPos, Rect, SelectionIndices, VPos};

/// What a header learns from its owning skin when it is initialised
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderContext {
    /// Width of the row header (gutter)
    pub vertical_header_width: f64,
    /// Preferred height of the column header
    pub column_header_height: f64,
    pub show_row_header: bool,
    pub show_column_header: bool,
}

/// A header node the layout pass can position
pub trait HeaderNode {
    /// Initialise with the owning skin's settings
    fn init(&mut self, _context: &HeaderContext) {}

    fn pref_height(&self) -> f64;

    fn layout_in_area(&mut self, area: Rect, baseline_offset: f64, halign: HPos, valign: VPos);
}

/// Row header capability: follows the vertical scroll
pub trait RowHeaderView: HeaderNode {
    fn update_scroll_y(&mut self, scroll_y: f64, rows: &[RowPlacement], selection: &SelectionIndices);
}

/// Area a node was last laid out in
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Placement {
    pub area: Rect,
    pub baseline_offset: f64,
}

/// Column header row
#[derive(Debug, Clone, Default)]
pub struct ColumnHeader {
    height: f64,
    placement: Option<Placement>,
    layouts: usize,
}

impl ColumnHeader {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// How many times the node has been laid out
    pub fn layout_count(&self) -> usize {
        self.layouts
    }
}

impl HeaderNode for ColumnHeader {
    fn init(&mut self, context: &HeaderContext) {
        self.height = context.column_header_height;
    }

    fn pref_height(&self) -> f64 {
        self.height
    }

    fn layout_in_area(&mut self, area: Rect, baseline_offset: f64, _halign: HPos, _valign: VPos) {
        self.placement = Some(Placement {
            area,
            baseline_offset,
        });
        self.layouts += 1;
    }
}

/// One row label in the gutter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderLabel {
    pub row: usize,
    /// Offset from the top of the scrollable area
    pub y: f64,
    pub height: f64,
    pub fixed: bool,
    pub selected: bool,
    pub text: String,
}

/// Row header (gutter) showing 1-based row numbers
#[derive(Debug, Clone, Default)]
pub struct VerticalHeader {
    width: f64,
    labels: Vec<HeaderLabel>,
    scroll_y: f64,
    placement: Option<Placement>,
}

impl VerticalHeader {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn labels(&self) -> &[HeaderLabel] {
        &self.labels
    }

    /// Vertical offset last reported by the scroll synchronizer
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
}

impl HeaderNode for VerticalHeader {
    fn init(&mut self, context: &HeaderContext) {
        self.width = context.vertical_header_width;
    }

    fn pref_height(&self) -> f64 {
        self.labels.iter().map(|l| l.y + l.height).fold(0.0, f64::max)
    }

    fn layout_in_area(&mut self, area: Rect, baseline_offset: f64, _halign: HPos, _valign: VPos) {
        self.placement = Some(Placement {
            area,
            baseline_offset,
        });
    }
}

impl RowHeaderView for VerticalHeader {
    fn update_scroll_y(&mut self, scroll_y: f64, rows: &[RowPlacement], selection: &SelectionIndices) {
        self.scroll_y = scroll_y;
        self.labels = rows
            .iter()
            .map(|row| HeaderLabel {
                row: row.index,
                y: row.y,
                height: row.height,
                fixed: row.fixed,
                selected: selection.is_row_selected(row.index),
                text: (row.index + 1).to_string(),
            })
            .collect();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    fn context() -> HeaderContext {
        HeaderContext {
            vertical_header_width: 55.0,
            column_header_height: 30.0,
            show_row_header: true,
            show_column_header: true,
        }
    }

    #[test]
    fn test_init_takes_skin_settings() {
        let mut header = ColumnHeader::new(24.0);
        header.init(&context());
        assert_eq!(header.pref_height(), 30.0);

        let mut gutter = VerticalHeader::new(40.0);
        gutter.init(&context());
        assert_eq!(gutter.width(), 55.0);
    }

    #[test]
    fn test_labels_follow_rows_and_selection() {
        let mut gutter = VerticalHeader::new(40.0);
        let rows = [
            RowPlacement {
                index: 0,
                y: 0.0,
                height: 24.0,
                fixed: true,
            },
            RowPlacement {
                index: 12,
                y: 20.0,
                height: 24.0,
                fixed: false,
            },
        ];
        let mut selection = SelectionIndices::new();
        selection.rows.insert(12);

        gutter.update_scroll_y(268.0, &rows, &selection);
        assert_eq!(gutter.scroll_y(), 268.0);
        assert_eq!(gutter.labels().len(), 2);
        assert_eq!(gutter.labels()[0].text, "1");
        assert!(gutter.labels()[0].fixed);
        assert!(!gutter.labels()[0].selected);
        assert_eq!(gutter.labels()[1].text, "13");
        assert!(gutter.labels()[1].selected);
        assert_eq!(gutter.pref_height(), 44.0);
    }

    #[test]
    fn test_layout_records_area() {
        let mut header = ColumnHeader::new(24.0);
        let area = Rect::new(40.0, 0.0, 360.0, 24.0);
        header.layout_in_area(area, 150.0, HPos::Center, VPos::Center);
        header.layout_in_area(area, 150.0, HPos::Center, VPos::Center);
        assert_eq!(header.placement().unwrap().area, area);
        assert_eq!(header.layout_count(), 2);
    }
}
