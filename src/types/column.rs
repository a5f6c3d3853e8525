//! Leaf column model: identity, width, visibility and the ordered column set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default preferred width of a column that has no explicit width
pub const DEFAULT_COLUMN_WIDTH: f64 = 80.0;

/// Identity of a leaf column, equal to its model column index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub usize);

impl ColumnId {
    /// Model column index used to look values up in the grid
    pub fn index(self) -> usize {
        self.0
    }

    /// Spreadsheet-style label (A, B, ..., Z, AA, AB, ...)
    pub fn letter(self) -> String {
        let mut result = String::new();
        let mut n = self.0.saturating_add(1);
        while n > 0 {
            n -= 1;
            let offset = u8::try_from(n % 26).unwrap_or(0);
            result.insert(0, char::from(b'A' + offset));
            n /= 26;
        }
        result
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.letter())
    }
}

fn default_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

fn default_visible() -> bool {
    true
}

/// An atomic column: the unit of width measurement and pinning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafColumn {
    pub id: ColumnId,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl LeafColumn {
    pub fn new(id: usize, width: f64) -> Self {
        Self {
            id: ColumnId(id),
            title: ColumnId(id).letter(),
            width,
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// How column widths react to the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Columns keep their own widths
    #[default]
    Unconstrained,
    /// Columns always sum to the full available width, so auto-size never shrinks
    Constrained,
}

/// Ordered leaf columns of the table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Columns {
    columns: Vec<LeafColumn>,
}

impl Columns {
    pub fn new(columns: Vec<LeafColumn>) -> Self {
        Self { columns }
    }

    /// Uniform columns `0..count`
    pub fn uniform(count: usize, width: f64) -> Self {
        Self::new((0..count).map(|i| LeafColumn::new(i, width)).collect())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeafColumn> {
        self.columns.iter()
    }

    /// Visible leaf columns in display order
    pub fn visible(&self) -> impl Iterator<Item = &LeafColumn> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().count()
    }

    /// The i-th visible leaf column
    pub fn visible_leaf(&self, i: usize) -> Option<&LeafColumn> {
        self.visible().nth(i)
    }

    pub fn get(&self, id: ColumnId) -> Option<&LeafColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ColumnId) -> Option<&mut LeafColumn> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Position of a column among the visible leaves
    pub fn visible_position(&self, id: ColumnId) -> Option<usize> {
        self.visible().position(|c| c.id == id)
    }

    /// Sum of widths of the visible leaves preceding `id`.
    ///
    /// `None` when the column is unknown or hidden.
    pub fn start_of(&self, id: ColumnId) -> Option<f64> {
        let mut start = 0.0;
        for column in self.visible() {
            if column.id == id {
                return Some(start);
            }
            start += column.width;
        }
        None
    }

    /// Sum of widths of the first `k` visible leaves
    pub fn prefix_width(&self, k: usize) -> f64 {
        self.visible().take(k).map(|c| c.width).sum()
    }

    /// Total width of all visible leaves
    pub fn total_width(&self) -> f64 {
        self.visible().map(|c| c.width).sum()
    }

    /// Set a column width, returns false for unknown columns
    pub fn set_width(&mut self, id: ColumnId, width: f64) -> bool {
        match self.get_mut(id) {
            Some(column) => {
                column.width = width;
                true
            }
            None => false,
        }
    }

    pub fn widths(&self) -> Vec<(ColumnId, f64)> {
        self.columns.iter().map(|c| (c.id, c.width)).collect()
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
    fn test_letters() {
        assert_eq!(ColumnId(0).letter(), "A");
        assert_eq!(ColumnId(25).letter(), "Z");
        assert_eq!(ColumnId(26).letter(), "AA");
        assert_eq!(ColumnId(27).letter(), "AB");
        assert_eq!(ColumnId(701).letter(), "ZZ");
        assert_eq!(ColumnId(702).letter(), "AAA");
    }

    #[test]
    fn test_start_skips_hidden_columns() {
        let columns = Columns::new(vec![
            LeafColumn::new(0, 30.0),
            LeafColumn::new(1, 100.0).hidden(),
            LeafColumn::new(2, 50.0),
            LeafColumn::new(3, 70.0),
        ]);

        assert_eq!(columns.start_of(ColumnId(0)), Some(0.0));
        assert_eq!(columns.start_of(ColumnId(1)), None);
        assert_eq!(columns.start_of(ColumnId(2)), Some(30.0));
        assert_eq!(columns.start_of(ColumnId(3)), Some(80.0));
        assert_eq!(columns.start_of(ColumnId(9)), None);
        assert_eq!(columns.total_width(), 150.0);
        assert_eq!(columns.prefix_width(2), 80.0);
        assert_eq!(columns.visible_position(ColumnId(3)), Some(2));
        assert_eq!(columns.visible_leaf(1).map(|c| c.id), Some(ColumnId(2)));
    }

    #[test]
    fn test_prefix_width_past_end() {
        let columns = Columns::uniform(3, 20.0);
        assert_eq!(columns.prefix_width(0), 0.0);
        assert_eq!(columns.prefix_width(10), 60.0);
    }
}
