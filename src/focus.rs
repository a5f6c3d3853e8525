//! Focus/selection scroll controller.
//!
//! Turns focus movement into a vertical scroll command that never leaves the
//! focused row hidden behind the pinned band.

use crate::fixed::FixedRows;
use crate::flow::RowView;
use crate::types::ColumnId;

/// Source of the focused cell
pub trait FocusModel {
    fn focused_index(&self) -> Option<usize>;

    fn focused_column(&self) -> Option<ColumnId>;
}

/// Plain focus model: a settable focused cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusedCell {
    pub row: Option<usize>,
    pub column: Option<ColumnId>,
}

impl FocusedCell {
    pub fn at(row: usize, column: ColumnId) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
        }
    }
}

impl FocusModel for FocusedCell {
    fn focused_index(&self) -> Option<usize> {
        self.row
    }

    fn focused_column(&self) -> Option<ColumnId> {
        self.column
    }
}

/// Vertical scroll command issued for a focus change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusScroll {
    /// Force the row to the top of the scrollable region
    ScrollToTop(usize),
    /// Scroll just enough to bring the row into view
    Show(usize),
}

/// Pick the scroll command for a focus move to `target`.
///
/// The first `fixed.len()` materialized cells are the pinned band; the cell
/// right after it is the first scrollable row on screen. A non-pinned target
/// above that row sits behind the band, and `show` alone would leave it
/// there.
pub fn focus_scroll<R: RowView>(cells: &[R], fixed: &FixedRows, target: usize) -> FocusScroll {
    let first_scrollable = cells.get(fixed.len()).map(RowView::index);
    match first_scrollable {
        Some(index) if !cells.is_empty() && index > target && !fixed.contains(target) => {
            FocusScroll::ScrollToTop(target)
        }
        _ => FocusScroll::Show(target),
    }
}
