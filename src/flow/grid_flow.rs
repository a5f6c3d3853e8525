//! Reference virtualized flow.
//!
//! Rows are laid out over prefix sums of their heights. Fixed rows are always
//! materialized first, stacked at the top of the viewport at constant screen
//! offsets; they cover the band `[0, pinned_height)`. Every other row lives in
//! the scrollable band below it:
//!
//! - Fixed row screen y = sum of the fixed row heights above it (no scroll)
//! - Other rows screen y = layout_y - scroll_value
//!
//! so a non-pinned row is visible when it intersects `[pinned_height, height)`.

use std::collections::HashMap;

use super::{Direction, PinnedRegion, RowView, VirtualFlow};
use crate::grid::Grid;
use crate::layout::AxisLayout;
use crate::types::{Rect, ScrollBar};

/// Row view materialized by [`GridFlow`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    index: usize,
    layout_y: f64,
    height: f64,
    fixed: bool,
    pinned_overlay: bool,
    overlay_resets: usize,
}

impl GridRow {
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Whether pinned cells are currently drawn in front of scrolled ones
    pub fn has_pinned_overlay(&self) -> bool {
        self.pinned_overlay
    }

    /// How many times this row's pinned overlay has been torn down
    pub fn overlay_resets(&self) -> usize {
        self.overlay_resets
    }
}

impl RowView for GridRow {
    fn index(&self) -> usize {
        self.index
    }

    fn layout_y(&self) -> f64 {
        self.layout_y
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn put_fixed_columns_to_back(&mut self) {
        self.pinned_overlay = false;
        self.overlay_resets = self.overlay_resets.saturating_add(1);
    }
}

/// In-memory [`VirtualFlow`]
#[derive(Debug, Clone)]
pub struct GridFlow {
    rows: AxisLayout,
    /// Fixed rows, ascending and in range
    fixed: Vec<usize>,
    pinned_height: f64,
    pinned_columns: usize,
    content_width: f64,
    area: Rect,
    vbar: ScrollBar,
    hbar: ScrollBar,
    cells: Vec<GridRow>,
    layouts: usize,
}

impl GridFlow {
    /// Empty flow with a viewport of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rows: AxisLayout::default(),
            fixed: Vec::new(),
            pinned_height: 0.0,
            pinned_columns: 0,
            content_width: 0.0,
            area: Rect::new(0.0, 0.0, width, height),
            vbar: ScrollBar::new(),
            hbar: ScrollBar::new(),
            cells: Vec::new(),
            layouts: 0,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn pinned_height(&self) -> f64 {
        self.pinned_height
    }

    /// Number of full relayouts performed so far
    pub fn layout_count(&self) -> usize {
        self.layouts
    }

    /// Indices of the materialized rows, in display order
    pub fn materialized_indices(&self) -> Vec<usize> {
        self.cells.iter().map(|c| c.index).collect()
    }

    /// First non-pinned row at the top of the scrollable band, with the part
    /// of it hidden under the pinned band (the sub-pixel remainder).
    pub fn first_scrollable_row(&self) -> Option<(usize, f64)> {
        let band_top = self.vbar.value() + self.pinned_height;
        let mut row = self.rows.index_at(band_top)?;
        while self.is_fixed(row) {
            row += 1;
        }
        let pos = self.rows.position(row)?;
        Some((row, (band_top - pos).max(0.0)))
    }

    /// Screen y of a row inside the flow, accounting for the pinned band
    pub fn screen_y(&self, row: usize) -> Option<f64> {
        if self.is_fixed(row) {
            let above: f64 = self
                .fixed
                .iter()
                .take_while(|r| **r < row)
                .filter_map(|r| self.rows.size(*r))
                .sum();
            return Some(above);
        }
        Some(self.rows.position(row)? - self.vbar.value())
    }

    fn is_fixed(&self, row: usize) -> bool {
        self.fixed.binary_search(&row).is_ok()
    }

    fn update_bounds(&mut self) {
        self.vbar.set_max(self.rows.total() - self.area.height);
        self.hbar.set_max(self.content_width - self.area.width);
    }

    /// Rebuild the materialized rows for the current scroll position
    fn materialize(&mut self) {
        let carried: HashMap<usize, usize> = self
            .cells
            .iter()
            .map(|c| (c.index, c.overlay_resets))
            .collect();
        let overlay = self.pinned_columns > 0;
        let row_view = |index: usize, layout_y: f64, height: f64, fixed: bool| GridRow {
            index,
            layout_y,
            height,
            fixed,
            pinned_overlay: overlay,
            overlay_resets: carried.get(&index).copied().unwrap_or(0),
        };

        let mut cells = Vec::new();
        let mut y = 0.0;
        for &row in &self.fixed {
            let Some(height) = self.rows.size(row) else {
                continue;
            };
            cells.push(row_view(row, y, height, true));
            y += height;
        }

        let value = self.vbar.value();
        let band_top = value + self.pinned_height;
        let band_bottom = value + self.area.height;
        if band_bottom > band_top {
            let mut row = self.rows.index_at(band_top).unwrap_or(self.rows.len());
            while let (Some(pos), Some(height)) = (self.rows.position(row), self.rows.size(row)) {
                if pos >= band_bottom {
                    break;
                }
                if height > 0.0 && !self.is_fixed(row) {
                    cells.push(row_view(row, pos - value, height, false));
                }
                row += 1;
            }
        }

        self.cells = cells;
    }
}

impl VirtualFlow for GridFlow {
    type Row = GridRow;

    fn cells(&self) -> &[GridRow] {
        &self.cells
    }

    fn cells_mut(&mut self) -> &mut [GridRow] {
        &mut self.cells
    }

    fn scroll_to(&mut self, index: usize) {
        if self.is_fixed(index) {
            return;
        }
        let Some(pos) = self.rows.position(index) else {
            return;
        };
        self.vbar.set_value(pos - self.pinned_height);
        self.materialize();
    }

    fn show(&mut self, index: usize) {
        if self.is_fixed(index) {
            return;
        }
        let (Some(pos), Some(height)) = (self.rows.position(index), self.rows.size(index)) else {
            return;
        };
        let value = self.vbar.value();
        let top = pos - value;
        let bottom = top + height;
        let aligned_top = pos - self.pinned_height;
        let target = if top < self.pinned_height {
            aligned_top
        } else if bottom > self.area.height {
            // Never push the row's top edge under the pinned band
            (pos + height - self.area.height).min(aligned_top)
        } else {
            return;
        };
        self.vbar.set_value(target);
        self.materialize();
    }

    fn vertical_bar(&self) -> &ScrollBar {
        &self.vbar
    }

    fn set_vertical_value(&mut self, value: f64) -> bool {
        let changed = self.vbar.set_value(value);
        if changed {
            self.materialize();
        }
        changed
    }

    fn horizontal_bar(&self) -> &ScrollBar {
        &self.hbar
    }

    fn horizontal_bar_mut(&mut self) -> &mut ScrollBar {
        &mut self.hbar
    }

    fn layout_total(&mut self, grid: &dyn Grid, region: &PinnedRegion, content_width: f64) {
        self.rows = AxisLayout::rows_of(grid);
        let len = self.rows.len();
        self.fixed = region.rows.iter().copied().filter(|r| *r < len).collect();
        self.fixed.sort_unstable();
        self.fixed.dedup();
        self.pinned_height = region.height;
        self.pinned_columns = region.columns;
        self.content_width = content_width;
        self.update_bounds();
        self.materialize();
        self.layouts += 1;
    }

    fn resize_relocate(&mut self, area: Rect) {
        self.area = area;
        self.update_bounds();
        self.materialize();
    }

    fn select_adjacent(&mut self, direction: Direction, anchor: Option<usize>) {
        let Some(row) = anchor else {
            return;
        };
        let last = self.rows.len().saturating_sub(1);
        let target = match direction {
            Direction::Previous => row.saturating_sub(1),
            Direction::Next => row.saturating_add(1).min(last),
        };
        self.show(target);
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

    /// 100 rows of 24px in a 240px viewport (10 rows visible)
    fn flow_with_fixed(fixed: &[usize]) -> (GridModel, GridFlow) {
        let grid = GridModel::blank(100, 4, 24.0);
        let mut flow = GridFlow::new(400.0, 240.0);
        let region = PinnedRegion {
            rows: fixed.to_vec(),
            height: 24.0 * fixed.len() as f64,
            columns: 0,
            width: 0.0,
        };
        flow.layout_total(&grid, &region, 800.0);
        (grid, flow)
    }

    #[test]
    fn test_initial_materialization() {
        let (_, flow) = flow_with_fixed(&[]);
        assert_eq!(flow.materialized_indices(), (0..10).collect::<Vec<_>>());
        assert_eq!(flow.vertical_bar().max(), 2400.0 - 240.0);
        assert_eq!(flow.horizontal_bar().max(), 400.0);
        assert_eq!(flow.layout_count(), 1);
    }

    #[test]
    fn test_fixed_rows_come_first() {
        let (_, mut flow) = flow_with_fixed(&[0, 1]);
        assert_eq!(flow.materialized_indices(), (0..10).collect::<Vec<_>>());

        flow.set_vertical_value(24.0 * 30.0);
        let indices = flow.materialized_indices();
        assert_eq!(&indices[..3], &[0, 1, 32]);
        assert_eq!(indices.len(), 10);
        assert_eq!(flow.cells()[0].layout_y(), 0.0);
        assert_eq!(flow.cells()[1].layout_y(), 24.0);
        assert_eq!(flow.cells()[2].layout_y(), 48.0);
        assert_eq!(flow.first_scrollable_row(), Some((32, 0.0)));
    }

    #[test]
    fn test_scroll_to_aligns_below_band() {
        let (_, mut flow) = flow_with_fixed(&[0, 1]);
        flow.scroll_to(50);
        assert_eq!(flow.vertical_bar().value(), 50.0 * 24.0 - 48.0);
        assert_eq!(flow.screen_y(50), Some(48.0));
        assert_eq!(flow.cells()[2].index(), 50);
    }

    #[test]
    fn test_scroll_to_fixed_row_is_noop() {
        let (_, mut flow) = flow_with_fixed(&[0, 1]);
        flow.set_vertical_value(500.0);
        flow.scroll_to(1);
        assert_eq!(flow.vertical_bar().value(), 500.0);
    }

    #[test]
    fn test_show_is_minimal() {
        let (_, mut flow) = flow_with_fixed(&[0]);
        // Already visible: no movement
        flow.show(5);
        assert_eq!(flow.vertical_bar().value(), 0.0);

        // Below the viewport: bottom-align
        flow.show(20);
        assert_eq!(flow.vertical_bar().value(), 21.0 * 24.0 - 240.0);
        assert_eq!(flow.screen_y(20), Some(240.0 - 24.0));

        // Hidden under the pinned band: top-align below the band
        flow.show(11);
        assert_eq!(flow.vertical_bar().value(), 11.0 * 24.0 - 24.0);
        assert_eq!(flow.screen_y(11), Some(24.0));
    }

    #[test]
    fn test_scroll_clamps_at_end() {
        let (_, mut flow) = flow_with_fixed(&[0, 1]);
        flow.scroll_to(99);
        assert_eq!(flow.vertical_bar().value(), flow.vertical_bar().max());
        assert_eq!(flow.materialized_indices().last(), Some(&99));
    }

    #[test]
    fn test_partial_row_remainder() {
        let (_, mut flow) = flow_with_fixed(&[]);
        flow.set_vertical_value(30.0);
        assert_eq!(flow.first_scrollable_row(), Some((1, 6.0)));
        assert_eq!(flow.cells()[0].index(), 1);
    }

    #[test]
    fn test_select_adjacent_shows_target() {
        let (_, mut flow) = flow_with_fixed(&[]);
        flow.select_adjacent(Direction::Next, Some(9));
        assert_eq!(flow.screen_y(10), Some(240.0 - 24.0));
        flow.select_adjacent(Direction::Previous, Some(0));
        assert_eq!(flow.vertical_bar().value(), 0.0);
    }

    #[test]
    fn test_select_without_anchor_stays_put() {
        let (_, mut flow) = flow_with_fixed(&[0, 1]);
        flow.set_vertical_value(500.0);
        flow.select_adjacent(Direction::Previous, None);
        flow.select_adjacent(Direction::Next, None);
        assert_eq!(flow.vertical_bar().value(), 500.0);
        assert_eq!(flow.cells()[2].index(), 22);
    }

    #[test]
    fn test_overlay_resets_survive_relayout() {
        let grid = GridModel::blank(20, 4, 24.0);
        let mut flow = GridFlow::new(400.0, 240.0);
        let region = PinnedRegion {
            rows: vec![],
            height: 0.0,
            columns: 2,
            width: 160.0,
        };
        flow.layout_total(&grid, &region, 800.0);
        assert!(flow.cells().iter().all(GridRow::has_pinned_overlay));

        for cell in flow.cells_mut() {
            cell.put_fixed_columns_to_back();
        }
        let region = PinnedRegion {
            columns: 0,
            width: 0.0,
            ..region
        };
        flow.layout_total(&grid, &region, 800.0);
        assert!(flow.cells().iter().all(|c| c.overlay_resets() == 1));
        assert!(!flow.cells().iter().any(GridRow::has_pinned_overlay));
    }
}
