//! Scroll synchronizer.
//!
//! Keeps the vertical and horizontal scroll offsets consistent with the
//! pinned regions:
//! - Vertically, pinned rows are drawn at constant screen offsets; only the
//!   non-pinned rows follow the scrollbar.
//! - Horizontally, aligning a column never leaves it under the pinned band.

use serde::Serialize;
use std::collections::HashMap;

use crate::fixed::FixedRows;
use crate::flow::{RowView, VirtualFlow};
use crate::grid::Grid;
use crate::types::{ColumnId, Columns};

/// Screen placement of a materialized row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowPlacement {
    pub index: usize,
    pub y: f64,
    pub height: f64,
    pub fixed: bool,
}

/// Where each materialized row is drawn for the current vertical value.
///
/// Pinned rows stack from the top in ascending order at offsets that do not
/// depend on the scrollbar; every other row keeps its flow position.
pub fn overlay_placements<R: RowView>(
    cells: &[R],
    fixed: &FixedRows,
    grid: &dyn Grid,
) -> Vec<RowPlacement> {
    let mut pinned_offsets = HashMap::with_capacity(fixed.len());
    let mut offset = 0.0;
    for row in fixed.in_range(grid.row_count()) {
        pinned_offsets.insert(row, offset);
        offset += grid.row_height(row);
    }

    cells
        .iter()
        .map(|cell| {
            let index = cell.index();
            match pinned_offsets.get(&index) {
                Some(y) => RowPlacement {
                    index,
                    y: *y,
                    height: cell.height(),
                    fixed: true,
                },
                None => RowPlacement {
                    index,
                    y: cell.layout_y(),
                    height: cell.height(),
                    fixed: false,
                },
            }
        })
        .collect()
}

/// `(start, end)` of a column among the visible leaf columns.
///
/// `None` when the column is hidden or unknown.
pub fn column_extent(columns: &Columns, id: ColumnId) -> Option<(f64, f64)> {
    let start = columns.start_of(id)?;
    let width = columns.get(id)?.width;
    Some((start, start + width))
}

/// Inputs of one horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalScroll {
    /// Sum of widths of the visible leaves preceding the target
    pub start: f64,
    /// `start` + target width
    pub end: f64,
    /// Aggregate pinned column width
    pub fixed_column_width: f64,
    /// Skin width minus left and right insets
    pub header_width: f64,
    /// Current horizontal scroll value
    pub pos: f64,
    /// Maximum horizontal scroll value
    pub max: f64,
}

impl HorizontalScroll {
    /// New scroll value for the target.
    ///
    /// The comparison operators are load-bearing: a column starting exactly
    /// at `pos + fixed_column_width` takes the second branch.
    pub fn new_position(&self) -> f64 {
        let Self {
            start,
            end,
            fixed_column_width,
            header_width,
            pos,
            max,
        } = *self;

        if start < pos + fixed_column_width && start >= 0.0 && start >= fixed_column_width {
            // Pull the target out from beneath the pinned band
            (start - fixed_column_width).max(0.0)
        } else {
            let delta = if start < 0.0 || end > header_width {
                start - pos - fixed_column_width
            } else {
                0.0
            };
            (pos + delta).min(max)
        }
    }
}

/// Align the flow's horizontal bar on `target`.
///
/// Returns the value applied, or `None` when the column is hidden or unknown.
pub fn scroll_horizontally<F: VirtualFlow>(
    flow: &mut F,
    columns: &Columns,
    target: ColumnId,
    fixed_column_width: f64,
    header_width: f64,
) -> Option<f64> {
    let (start, end) = column_extent(columns, target)?;
    let bar = flow.horizontal_bar();
    let request = HorizontalScroll {
        start,
        end,
        fixed_column_width,
        header_width,
        pos: bar.value(),
        max: bar.max(),
    };
    let new_pos = request.new_position();
    log::trace!("[scroll] align {target}: {request:?} -> {new_pos}");
    flow.horizontal_bar_mut().set_value(new_pos);
    Some(flow.horizontal_bar().value())
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
    use crate::flow::{GridFlow, PinnedRegion};
    use crate::grid::GridModel;
    use crate::types::LeafColumn;
    use test_case::test_case;

    fn request(start: f64, width: f64, fixed: f64, pos: f64) -> HorizontalScroll {
        HorizontalScroll {
            start,
            end: start + width,
            fixed_column_width: fixed,
            header_width: 200.0,
            pos,
            max: 1000.0,
        }
    }

    #[test]
    fn test_visible_column_needs_no_scroll() {
        // start 40 < 0 + 30 is false, end 90 <= 200 and start >= 0: delta 0
        assert_eq!(request(40.0, 50.0, 30.0, 0.0).new_position(), 0.0);
    }

    #[test]
    fn test_column_under_pinned_band_is_pulled_out() {
        assert_eq!(request(60.0, 50.0, 30.0, 100.0).new_position(), 30.0);
    }

    #[test]
    fn test_column_past_right_edge() {
        assert_eq!(request(500.0, 50.0, 30.0, 0.0).new_position(), 470.0);
    }

    #[test]
    fn test_clamped_to_max() {
        let mut r = request(1200.0, 50.0, 30.0, 0.0);
        r.max = 900.0;
        assert_eq!(r.new_position(), 900.0);
    }

    // start == pos + fixed is not "under the band"
    #[test_case(130.0, 100.0 ; "start at band edge")]
    // start == fixed with a scrolled view is under the band
    #[test_case(30.0, 0.0 ; "start equals fixed width")]
    fn test_boundaries(start: f64, expected: f64) {
        let r = HorizontalScroll {
            start,
            end: start + 20.0,
            fixed_column_width: 30.0,
            header_width: 200.0,
            pos: 100.0,
            max: 1000.0,
        };
        assert_eq!(r.new_position(), expected);
    }

    #[test_case(40.0, 0.0 ; "visible")]
    #[test_case(60.0, 100.0 ; "under band")]
    #[test_case(500.0, 0.0 ; "right of view")]
    #[test_case(500.0, 300.0 ; "scrolled past")]
    fn test_idempotent(start: f64, pos: f64) {
        let first = request(start, 50.0, 30.0, pos).new_position();
        let second = request(start, 50.0, 30.0, first).new_position();
        assert_eq!(first, second);
    }

    #[test_case(30.0 ; "first scrollable column")]
    #[test_case(60.0 ; "near")]
    #[test_case(450.0 ; "middle")]
    #[test_case(980.0 ; "far")]
    fn test_target_never_under_band(start: f64) {
        for pos in [0.0, 25.0, 100.0, 400.0, 900.0] {
            let new_pos = request(start, 50.0, 30.0, pos).new_position().clamp(0.0, 1000.0);
            assert!(
                start - new_pos >= 30.0,
                "start {start} pos {pos} -> {new_pos} hides the column"
            );
        }
    }

    #[test]
    fn test_scroll_horizontally_on_flow() {
        let grid = GridModel::blank(10, 10, 24.0);
        let columns = Columns::uniform(10, 50.0);
        let mut flow = GridFlow::new(200.0, 240.0);
        flow.layout_total(&grid, &PinnedRegion::default(), columns.total_width());

        let applied = scroll_horizontally(&mut flow, &columns, ColumnId(6), 0.0, 200.0);
        assert_eq!(applied, Some(300.0));
        assert_eq!(flow.horizontal_bar().value(), 300.0);

        let hidden = Columns::new(vec![LeafColumn::new(0, 50.0).hidden()]);
        assert_eq!(
            scroll_horizontally(&mut flow, &hidden, ColumnId(0), 0.0, 200.0),
            None
        );
        assert_eq!(flow.horizontal_bar().value(), 300.0);
    }

    #[test]
    fn test_overlay_keeps_pinned_rows_fixed() {
        let grid = GridModel::blank(100, 2, 24.0);
        let mut fixed = FixedRows::new();
        fixed.replace([0, 1], grid.row_count()).unwrap();
        fixed.recompute_height(&grid);

        let mut flow = GridFlow::new(200.0, 240.0);
        let region = PinnedRegion {
            rows: vec![0, 1],
            height: 48.0,
            columns: 0,
            width: 0.0,
        };
        flow.layout_total(&grid, &region, 100.0);

        for value in [0.0, 333.0, 1200.0] {
            flow.set_vertical_value(value);
            let placements = overlay_placements(flow.cells(), &fixed, &grid);
            assert_eq!(placements[0].y, 0.0);
            assert_eq!(placements[1].y, 24.0);
            assert!(placements[0].fixed && placements[1].fixed);
            assert!(!placements[2].fixed);
            assert!(placements[2].y <= 48.0);
        }
    }
}
