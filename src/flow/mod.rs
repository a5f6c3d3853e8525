//! Windowing collaborator contract.
//!
//! The virtualized flow materializes only the rows that are currently
//! visible and recycles them as the scroll position changes. The skin drives
//! it through [`VirtualFlow`] and talks to the materialized rows only through
//! the narrow [`RowView`] capability.

mod grid_flow;

pub use grid_flow::{GridFlow, GridRow};

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Rect, ScrollBar};

/// A materialized row view
pub trait RowView {
    /// Grid row this view is bound to
    fn index(&self) -> usize;

    /// Vertical offset of the view inside the flow
    fn layout_y(&self) -> f64;

    fn height(&self) -> f64;

    /// Tear down the per-row overlay that draws pinned cells in front of
    /// the scrolled ones
    fn put_fixed_columns_to_back(&mut self);
}

/// Direction of a previous/next navigation action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Pinned-region aggregates handed to the flow on every full relayout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PinnedRegion {
    /// Fixed rows in ascending order, in range for the current grid
    pub rows: Vec<usize>,
    /// Sum of the fixed row heights
    pub height: f64,
    /// Number of fixed leading columns
    pub columns: usize,
    /// Sum of the fixed column widths
    pub width: f64,
}

/// Virtualized flow of row views
pub trait VirtualFlow {
    type Row: RowView;

    /// Currently materialized row views, in display order
    fn cells(&self) -> &[Self::Row];

    fn cells_mut(&mut self) -> &mut [Self::Row];

    /// Scroll so `index` sits at the top of the scrollable (non-pinned) region
    fn scroll_to(&mut self, index: usize);

    /// Scroll just enough to bring `index` into view
    fn show(&mut self, index: usize);

    fn vertical_bar(&self) -> &ScrollBar;

    /// Move the vertical scroll position, returns true when it changed
    fn set_vertical_value(&mut self, value: f64) -> bool;

    fn horizontal_bar(&self) -> &ScrollBar;

    fn horizontal_bar_mut(&mut self) -> &mut ScrollBar;

    /// Full (non-incremental) relayout against the current pinned region
    fn layout_total(&mut self, grid: &dyn Grid, region: &PinnedRegion, content_width: f64);

    /// Position the flow inside the skin
    fn resize_relocate(&mut self, area: Rect);

    /// Default selection-scroll behaviour for previous/next-cell selection
    fn select_adjacent(&mut self, _direction: Direction, _anchor: Option<usize>) {}
}
