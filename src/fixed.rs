//! Fixed region tracker.
//!
//! Owns the fixed (frozen) row indices and fixed column references and caches
//! their aggregate pixel footprint. The caches are instance-scoped and only
//! written through the `recompute_*` entry points, which are idempotent.

use std::collections::BTreeSet;

use crate::error::{GridError, Result};
use crate::flow::PinnedRegion;
use crate::grid::Grid;
use crate::types::{ColumnId, Columns};

/// Fixed rows with their cached aggregate height.
///
/// The set is always the leading prefix `0..len` of the grid's rows.
#[derive(Debug, Clone, Default)]
pub struct FixedRows {
    count: usize,
    height: f64,
}

impl FixedRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, row: usize) -> bool {
        row < self.count
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fixed rows in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        0..self.count
    }

    /// Cached aggregate height, valid as of the last recompute
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Extend the prefix by `row`, which must be the next row after it.
    ///
    /// Rows at or past `row_count` and rows already fixed are ignored.
    pub fn insert(&mut self, row: usize, row_count: usize) -> Result<bool> {
        if row >= row_count {
            log::debug!("[fixed] dropping row {row}, grid has {row_count} rows");
            return Ok(false);
        }
        if self.contains(row) {
            return Ok(false);
        }
        if row != self.count {
            return Err(GridError::NonContiguousFixedRows {
                row,
                expected: self.count,
            });
        }
        self.count += 1;
        Ok(true)
    }

    /// Shrink the prefix by `row`, which must be its last row
    pub fn remove(&mut self, row: usize) -> Result<bool> {
        if !self.contains(row) {
            return Ok(false);
        }
        if row + 1 != self.count {
            return Err(GridError::NonContiguousFixedRows {
                row,
                expected: self.count - 1,
            });
        }
        self.count = row;
        Ok(true)
    }

    /// Replace the whole set, returns how many indices were dropped as out
    /// of range.
    ///
    /// The remaining rows must be exactly `0..k`; on error the set is left
    /// unchanged.
    pub fn replace<I: IntoIterator<Item = usize>>(
        &mut self,
        rows: I,
        row_count: usize,
    ) -> Result<usize> {
        let mut dropped = 0;
        let mut kept = BTreeSet::new();
        for row in rows {
            if row < row_count {
                kept.insert(row);
            } else {
                dropped += 1;
            }
        }
        for (slot, row) in kept.iter().enumerate() {
            if *row != slot {
                return Err(GridError::NonContiguousFixedRows {
                    row: *row,
                    expected: slot,
                });
            }
        }
        if dropped > 0 {
            log::debug!("[fixed] dropped {dropped} out-of-range rows, grid has {row_count} rows");
        }
        self.count = kept.len();
        Ok(dropped)
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Drop fixed rows at or past `row_count`, returns how many were dropped
    pub fn truncate(&mut self, row_count: usize) -> usize {
        let dropped = self.count.saturating_sub(row_count);
        if dropped > 0 {
            log::debug!("[fixed] dropping {dropped} stale rows, grid has {row_count} rows");
            self.count = row_count;
        }
        dropped
    }

    /// Fixed rows that are valid for a grid of `row_count` rows
    pub fn in_range(&self, row_count: usize) -> Vec<usize> {
        (0..self.count.min(row_count)).collect()
    }

    /// Sum the heights of the fixed rows.
    ///
    /// Rows past the grid's current row count (the grid may have shrunk since
    /// they were fixed) are dropped from the set first.
    pub fn recompute_height(&mut self, grid: &dyn Grid) -> f64 {
        self.truncate(grid.row_count());
        self.height = self.iter().map(|row| grid.row_height(row)).sum();
        self.height
    }
}

/// Fixed leading columns with their cached aggregate width.
///
/// The set is always exactly the first `k` visible leaf columns.
#[derive(Debug, Clone, Default)]
pub struct FixedColumns {
    ids: Vec<ColumnId>,
    width: f64,
}

impl FixedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed columns in display order
    pub fn ids(&self) -> &[ColumnId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.ids.contains(&id)
    }

    /// Cached aggregate width, valid as of the last recompute
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Replace the set after checking that `ids` are exactly the first
    /// `ids.len()` visible leaf columns. Returns the previous size.
    ///
    /// On error the set is left unchanged.
    pub fn set(&mut self, ids: &[ColumnId], columns: &Columns) -> Result<usize> {
        let mut positioned = Vec::with_capacity(ids.len());
        for &id in ids {
            if columns.get(id).is_none() {
                return Err(GridError::UnknownColumn(id));
            }
            if positioned.iter().any(|(_, seen)| *seen == id) {
                continue;
            }
            positioned.push((columns.visible_position(id), id));
        }

        let expected = positioned.len();
        positioned.sort_by_key(|(position, _)| position.unwrap_or(usize::MAX));
        for (slot, (position, id)) in positioned.iter().enumerate() {
            if *position != Some(slot) {
                return Err(GridError::NonContiguousFixedColumns {
                    column: *id,
                    expected,
                });
            }
        }

        let previous = self.ids.len();
        self.ids = positioned.into_iter().map(|(_, id)| id).collect();
        Ok(previous)
    }

    /// Unfix every column, returns the previous size
    pub fn clear(&mut self) -> usize {
        let previous = self.ids.len();
        self.ids.clear();
        previous
    }

    /// Sum the widths of the first `k` visible leaf columns, `k` = set size
    pub fn recompute_width(&mut self, columns: &Columns) -> f64 {
        self.width = if self.ids.is_empty() {
            0.0
        } else {
            columns.prefix_width(self.ids.len())
        };
        self.width
    }
}

/// Tracker for both fixed sets
#[derive(Debug, Clone, Default)]
pub struct FixedRegionTracker {
    rows: FixedRows,
    columns: FixedColumns,
}

impl FixedRegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &FixedRows {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut FixedRows {
        &mut self.rows
    }

    pub fn columns(&self) -> &FixedColumns {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut FixedColumns {
        &mut self.columns
    }

    pub fn fixed_row_height(&self) -> f64 {
        self.rows.height()
    }

    pub fn fixed_column_width(&self) -> f64 {
        self.columns.width()
    }

    pub fn recompute_fixed_row_height(&mut self, grid: &dyn Grid) -> f64 {
        let height = self.rows.recompute_height(grid);
        log::trace!(
            "[fixed] {} fixed rows, aggregate height {height}",
            self.rows.len()
        );
        height
    }

    pub fn recompute_fixed_column_width(&mut self, columns: &Columns) -> f64 {
        let width = self.columns.recompute_width(columns);
        log::trace!(
            "[fixed] {} fixed columns, aggregate width {width}",
            self.columns.len()
        );
        width
    }

    /// Snapshot of the aggregates for a full relayout
    pub fn pinned_region(&self, grid: &dyn Grid) -> PinnedRegion {
        PinnedRegion {
            rows: self.rows.in_range(grid.row_count()),
            height: self.rows.height(),
            columns: self.columns.len(),
            width: self.columns.width(),
        }
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
    use crate::grid::GridModel;
    use crate::types::LeafColumn;

    #[test]
    fn test_row_height_sums_fixed_rows() {
        let mut grid = GridModel::blank(100, 3, 24.0);
        grid.set_row_height(2, 40.0);
        let mut rows = FixedRows::new();
        rows.replace([0, 1, 2], grid.row_count()).unwrap();
        assert_eq!(rows.recompute_height(&grid), 88.0);

        rows.clear();
        assert_eq!(rows.recompute_height(&grid), 0.0);
    }

    #[test]
    fn test_out_of_range_rows_are_dropped() {
        let grid = GridModel::blank(10, 1, 24.0);
        let mut rows = FixedRows::new();
        assert!(!rows.insert(10, grid.row_count()).unwrap());
        assert_eq!(rows.replace([0, 1, 12, 99], grid.row_count()).unwrap(), 2);
        assert_eq!(rows.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_rows_must_be_prefix() {
        let mut rows = FixedRows::new();
        rows.replace([1, 0], 100).unwrap();

        let err = rows.replace([0, 1, 5], 100).unwrap_err();
        assert!(matches!(
            err,
            GridError::NonContiguousFixedRows { row: 5, expected: 2 }
        ));
        assert_eq!(rows.len(), 2);

        let err = rows.insert(7, 100).unwrap_err();
        assert!(matches!(
            err,
            GridError::NonContiguousFixedRows { row: 7, expected: 2 }
        ));
        assert!(rows.insert(2, 100).unwrap());
        assert!(!rows.insert(1, 100).unwrap());

        // Only the last row of the prefix can be unfixed
        let err = rows.remove(0).unwrap_err();
        assert!(matches!(
            err,
            GridError::NonContiguousFixedRows { row: 0, expected: 2 }
        ));
        assert!(rows.remove(2).unwrap());
        assert!(!rows.remove(2).unwrap());
        assert_eq!(rows.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_shrunk_grid_drops_stale_rows() {
        let mut grid = GridModel::blank(10, 1, 24.0);
        let mut rows = FixedRows::new();
        rows.replace(0..8, grid.row_count()).unwrap();
        grid.truncate(5);
        assert_eq!(rows.in_range(grid.row_count()), vec![0, 1, 2, 3, 4]);
        assert_eq!(rows.recompute_height(&grid), 120.0);
        assert_eq!(rows.len(), 5);

        // Growing the grid again does not re-pin them
        let grid = GridModel::blank(10, 1, 24.0);
        assert_eq!(rows.recompute_height(&grid), 120.0);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let grid = GridModel::blank(10, 1, 24.0);
        let mut rows = FixedRows::new();
        rows.replace([0, 1, 2], grid.row_count()).unwrap();
        let first = rows.recompute_height(&grid);
        let second = rows.recompute_height(&grid);
        assert_eq!(first, second);
    }

    fn columns() -> Columns {
        Columns::new(vec![
            LeafColumn::new(0, 30.0),
            LeafColumn::new(1, 40.0),
            LeafColumn::new(2, 50.0).hidden(),
            LeafColumn::new(3, 60.0),
        ])
    }

    #[test]
    fn test_columns_must_be_prefix() {
        let columns = columns();
        let mut fixed = FixedColumns::new();

        assert_eq!(fixed.set(&[ColumnId(1), ColumnId(0)], &columns).unwrap(), 0);
        assert_eq!(fixed.ids(), &[ColumnId(0), ColumnId(1)]);
        assert_eq!(fixed.recompute_width(&columns), 70.0);

        let err = fixed.set(&[ColumnId(1)], &columns).unwrap_err();
        assert!(matches!(
            err,
            GridError::NonContiguousFixedColumns {
                column: ColumnId(1),
                expected: 1
            }
        ));
        assert_eq!(fixed.len(), 2);

        // Hidden columns are not part of the visible prefix
        let err = fixed
            .set(&[ColumnId(0), ColumnId(1), ColumnId(2)], &columns)
            .unwrap_err();
        assert!(matches!(err, GridError::NonContiguousFixedColumns { .. }));

        let err = fixed.set(&[ColumnId(7)], &columns).unwrap_err();
        assert!(matches!(err, GridError::UnknownColumn(ColumnId(7))));
    }

    #[test]
    fn test_columns_skip_hidden_in_width() {
        let columns = columns();
        let mut fixed = FixedColumns::new();
        fixed
            .set(&[ColumnId(0), ColumnId(1), ColumnId(3)], &columns)
            .unwrap();
        assert_eq!(fixed.recompute_width(&columns), 130.0);
        assert_eq!(fixed.clear(), 3);
        assert_eq!(fixed.recompute_width(&columns), 0.0);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let columns = columns();
        let mut fixed = FixedColumns::new();
        fixed
            .set(&[ColumnId(0), ColumnId(0)], &columns)
            .unwrap();
        assert_eq!(fixed.len(), 1);
    }

    #[test]
    fn test_pinned_region_snapshot() {
        let grid = GridModel::blank(4, 4, 20.0);
        let columns = columns();
        let mut tracker = FixedRegionTracker::new();
        tracker.rows_mut().replace([1, 0], grid.row_count()).unwrap();
        tracker.columns_mut().set(&[ColumnId(0)], &columns).unwrap();
        tracker.recompute_fixed_row_height(&grid);
        tracker.recompute_fixed_column_width(&columns);

        let region = tracker.pinned_region(&grid);
        assert_eq!(region.rows, vec![0, 1]);
        assert_eq!(region.height, 40.0);
        assert_eq!(region.columns, 1);
        assert_eq!(region.width, 30.0);
    }
}
