//! Grid data source contract and an in-memory implementation.

use std::collections::HashMap;

use crate::types::{CellValue, ColumnId};

/// Read-only logical data source: ordered rows with per-row heights.
pub trait Grid {
    fn row_count(&self) -> usize;

    /// Height of a row in pixels
    fn row_height(&self, row: usize) -> f64;

    fn value(&self, row: usize, column: ColumnId) -> Option<&CellValue>;
}

/// In-memory grid: rows of values, explicit heights for some rows and a
/// default height for the rest.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    rows: Vec<Vec<CellValue>>,
    row_heights: HashMap<usize, f64>,
    default_row_height: f64,
}

impl GridModel {
    pub fn new(rows: Vec<Vec<CellValue>>, default_row_height: f64) -> Self {
        Self {
            rows,
            row_heights: HashMap::new(),
            default_row_height,
        }
    }

    /// `row_count` rows of `column_count` empty cells
    pub fn blank(row_count: usize, column_count: usize, default_row_height: f64) -> Self {
        Self::new(
            vec![vec![CellValue::Empty; column_count]; row_count],
            default_row_height,
        )
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Set a value, growing the row if needed. Returns false for unknown rows.
    pub fn set_value(&mut self, row: usize, column: ColumnId, value: CellValue) -> bool {
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if cells.len() <= column.index() {
            cells.resize(column.index() + 1, CellValue::Empty);
        }
        match cells.get_mut(column.index()) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn set_row_height(&mut self, row: usize, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn clear_row_height(&mut self, row: usize) {
        self.row_heights.remove(&row);
    }

    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    /// Drop rows past `len`
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
        self.row_heights.retain(|row, _| *row < len);
    }
}

impl Grid for GridModel {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_height(&self, row: usize) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    fn value(&self, row: usize, column: ColumnId) -> Option<&CellValue> {
        self.rows.get(row)?.get(column.index())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_fall_back_to_default() {
        let mut grid = GridModel::blank(5, 2, 24.0);
        grid.set_row_height(3, 40.0);
        assert_eq!(grid.row_height(0), 24.0);
        assert_eq!(grid.row_height(3), 40.0);
        grid.clear_row_height(3);
        assert_eq!(grid.row_height(3), 24.0);
    }

    #[test]
    fn test_values() {
        let mut grid = GridModel::blank(2, 1, 24.0);
        assert!(grid.set_value(1, ColumnId(3), CellValue::from("x")));
        assert!(!grid.set_value(9, ColumnId(0), CellValue::from("x")));
        assert_eq!(grid.value(1, ColumnId(3)), Some(&CellValue::from("x")));
        assert_eq!(grid.value(1, ColumnId(2)), Some(&CellValue::Empty));
        assert_eq!(grid.value(0, ColumnId(3)), None);
        assert_eq!(grid.value(7, ColumnId(0)), None);
    }

    #[test]
    fn test_truncate_drops_heights() {
        let mut grid = GridModel::blank(10, 1, 20.0);
        grid.set_row_height(8, 50.0);
        grid.truncate(4);
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.row_height(8), 20.0);
    }
}
