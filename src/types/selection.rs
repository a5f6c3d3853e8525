use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Type of selection for row/column headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All cells selected (corner click)
    All,
}

/// Selection range supporting cell, row, column, and all selection types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub selection_type: SelectionType,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Selection {
    /// Create a new cell range selection
    pub fn cell_range(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            selection_type: SelectionType::CellRange,
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Create a row range selection
    pub fn row_range(start_row: usize, end_row: usize) -> Self {
        Self {
            selection_type: SelectionType::RowRange,
            start_row,
            start_col: 0,
            end_row,
            end_col: usize::MAX,
        }
    }

    /// Create a column range selection
    pub fn column_range(start_col: usize, end_col: usize) -> Self {
        Self {
            selection_type: SelectionType::ColumnRange,
            start_row: 0,
            start_col,
            end_row: usize::MAX,
            end_col,
        }
    }

    /// Create a select-all selection
    pub fn all() -> Self {
        Self {
            selection_type: SelectionType::All,
            start_row: 0,
            start_col: 0,
            end_row: usize::MAX,
            end_col: usize::MAX,
        }
    }

    /// Get normalized bounds (min/max)
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start_row.min(self.end_row),
            self.start_col.min(self.end_col),
            self.start_row.max(self.end_row),
            self.start_col.max(self.end_col),
        )
    }
}

/// Selected row and column indices, read by the headers for highlighting.
///
/// Owned by whoever drives selection; the engine only reads it. Range
/// selections are kept as inclusive spans, so selecting whole columns of a
/// very large grid costs nothing per row. `rows` and `columns` hold
/// individually selected indices on top of the spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionIndices {
    pub rows: BTreeSet<usize>,
    pub columns: BTreeSet<usize>,
    #[serde(default)]
    pub row_span: Option<(usize, usize)>,
    #[serde(default)]
    pub column_span: Option<(usize, usize)>,
}

fn span_contains(span: Option<(usize, usize)>, index: usize) -> bool {
    span.is_some_and(|(first, last)| first <= index && index <= last)
}

impl SelectionIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.rows.contains(&row) || span_contains(self.row_span, row)
    }

    pub fn is_column_selected(&self, column: usize) -> bool {
        self.columns.contains(&column) || span_contains(self.column_span, column)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.row_span = None;
        self.column_span = None;
    }

    /// Replace the indices with the spans covered by `selection`, bounded by
    /// the grid size so open-ended row/column ranges stay finite.
    pub fn apply(&mut self, selection: &Selection, row_count: usize, column_count: usize) {
        self.clear();
        if row_count == 0 || column_count == 0 {
            return;
        }
        let (min_row, min_col, max_row, max_col) = selection.bounds();
        let max_row = max_row.min(row_count - 1);
        let max_col = max_col.min(column_count - 1);
        if min_row <= max_row {
            self.row_span = Some((min_row, max_row));
        }
        if min_col <= max_col {
            self.column_span = Some((min_col, max_col));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_is_bounded() {
        let mut indices = SelectionIndices::new();
        indices.apply(&Selection::row_range(7, 5), 100, 3);
        assert_eq!(indices.row_span, Some((5, 7)));
        assert_eq!(indices.column_span, Some((0, 2)));
        assert!(indices.is_row_selected(6));
        assert!(!indices.is_row_selected(8));
    }

    #[test]
    fn test_all_on_huge_grid_stays_small() {
        let mut indices = SelectionIndices::new();
        indices.apply(&Selection::all(), 1_000_000_000, 50);
        assert!(indices.rows.is_empty());
        assert_eq!(indices.row_span, Some((0, 999_999_999)));
        assert!(indices.is_row_selected(999_999_999));
        assert!(!indices.is_row_selected(1_000_000_000));
        assert!(indices.is_column_selected(49));
    }

    #[test]
    fn test_all_on_empty_grid() {
        let mut indices = SelectionIndices::new();
        indices.rows.insert(4);
        indices.apply(&Selection::all(), 0, 5);
        assert!(indices.rows.is_empty());
        assert!(indices.row_span.is_none());
        assert!(indices.column_span.is_none());
    }

    #[test]
    fn test_cell_range() {
        let mut indices = SelectionIndices::new();
        indices.apply(&Selection::cell_range(2, 1, 3, 1), 10, 10);
        assert!(indices.is_row_selected(2));
        assert!(indices.is_row_selected(3));
        assert!(!indices.is_row_selected(4));
        assert!(indices.is_column_selected(1));
        assert!(!indices.is_column_selected(0));
    }

    #[test]
    fn test_individual_indices_add_to_span() {
        let mut indices = SelectionIndices::new();
        indices.apply(&Selection::row_range(2, 3), 10, 10);
        indices.rows.insert(8);
        assert!(indices.is_row_selected(8));
        assert!(indices.is_row_selected(2));
        assert!(!indices.is_row_selected(5));
    }
}
