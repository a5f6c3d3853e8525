//! Pre-computed offsets along one axis.
//!
//! Row (or column) positions are computed once per full relayout, enabling
//! O(log n) offset → index lookups while scrolling.

use crate::grid::Grid;

/// Cumulative positions and sizes of the items on one axis
#[derive(Debug, Clone, Default)]
pub struct AxisLayout {
    /// `positions[i]` = leading edge of item i; one extra trailing edge
    positions: Vec<f64>,
    sizes: Vec<f64>,
}

impl AxisLayout {
    /// Build from item sizes. Negative or non-finite sizes count as 0.
    pub fn from_sizes<I: IntoIterator<Item = f64>>(sizes: I) -> Self {
        let sizes: Vec<f64> = sizes
            .into_iter()
            .map(|s| if s.is_finite() { s.max(0.0) } else { 0.0 })
            .collect();
        let mut positions = Vec::with_capacity(sizes.len() + 1);
        let mut edge = 0.0;
        for size in &sizes {
            positions.push(edge);
            edge += size;
        }
        positions.push(edge); // Final edge
        Self { positions, sizes }
    }

    /// Row axis of a grid
    pub fn rows_of(grid: &dyn Grid) -> Self {
        Self::from_sizes((0..grid.row_count()).map(|row| grid.row_height(row)))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Leading edge of item `i`
    pub fn position(&self, i: usize) -> Option<f64> {
        if i < self.sizes.len() {
            self.positions.get(i).copied()
        } else {
            None
        }
    }

    pub fn size(&self, i: usize) -> Option<f64> {
        self.sizes.get(i).copied()
    }

    /// Total extent of the axis
    pub fn total(&self) -> f64 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Item containing `offset` (binary search).
    ///
    /// Offsets before the start map to item 0, offsets at or past the end
    /// return `None`.
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        if self.sizes.is_empty() || offset >= self.total() {
            return None;
        }
        let i = match self
            .positions
            .binary_search_by(|pos| pos.partial_cmp(&offset).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        // Zero-sized items share an edge with their successor
        let mut i = i.min(self.sizes.len() - 1);
        while self.size(i).is_some_and(|s| s <= 0.0) && i + 1 < self.sizes.len() {
            i += 1;
        }
        Some(i)
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

    #[test]
    fn test_basic_axis() {
        let axis = AxisLayout::from_sizes([20.0, 30.0, 10.0]);
        assert_eq!(axis.len(), 3);
        assert_eq!(axis.total(), 60.0);
        assert_eq!(axis.position(0), Some(0.0));
        assert_eq!(axis.position(2), Some(50.0));
        assert_eq!(axis.position(3), None);
        assert_eq!(axis.size(1), Some(30.0));
    }

    #[test]
    fn test_index_at() {
        let axis = AxisLayout::from_sizes([20.0, 30.0, 10.0]);
        assert_eq!(axis.index_at(-5.0), Some(0));
        assert_eq!(axis.index_at(0.0), Some(0));
        assert_eq!(axis.index_at(19.9), Some(0));
        assert_eq!(axis.index_at(20.0), Some(1));
        assert_eq!(axis.index_at(55.0), Some(2));
        assert_eq!(axis.index_at(60.0), None);
    }

    #[test]
    fn test_zero_sized_items_are_skipped() {
        let axis = AxisLayout::from_sizes([20.0, 0.0, 0.0, 10.0]);
        assert_eq!(axis.index_at(20.0), Some(3));
        assert_eq!(axis.position(3), Some(20.0));
    }

    #[test]
    fn test_empty_axis() {
        let axis = AxisLayout::from_sizes(std::iter::empty());
        assert!(axis.is_empty());
        assert_eq!(axis.total(), 0.0);
        assert_eq!(axis.index_at(0.0), None);
    }

    #[test]
    fn test_bad_sizes_count_as_zero() {
        let axis = AxisLayout::from_sizes([10.0, -4.0, f64::NAN, 5.0]);
        assert_eq!(axis.total(), 15.0);
    }
}
