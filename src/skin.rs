//! Grid skin: wires the fixed region tracker, the scroll synchronizer, the
//! focus controller, the column auto-sizer and the layout pass around a grid
//! and a virtualized flow.
//!
//! Every mutation follows the same order: recompute the cached aggregate
//! first, then request a full relayout of the flow.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::autosize::{fit_column_width, CellFactory, FitRequest, FitResult, MeasurementLayer};
use crate::config::{GridConfig, SampleLimit};
use crate::error::Result;
use crate::fixed::FixedRegionTracker;
use crate::flow::{Direction, PinnedRegion, RowView, VirtualFlow};
use crate::focus::{focus_scroll, FocusModel, FocusScroll};
use crate::grid::Grid;
use crate::header::{ColumnHeader, HeaderContext, HeaderNode, RowHeaderView, VerticalHeader};
use crate::layout::{plan_layout, LayoutInput, LayoutPlan};
use crate::scroll::{overlay_placements, scroll_horizontally, RowPlacement};
use crate::types::{
    ColumnId, Columns, HPos, Insets, Rect, ScrollBar, Selection, SelectionIndices, VPos,
};

/// Notifications delivered to the skin, one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridEvent {
    /// The vertical scrollbar was moved to this value
    VerticalScroll(f64),
    FocusPreviousCell,
    FocusNextCell,
    SelectPreviousCell,
    SelectNextCell,
    /// The host laid the skin out in these bounds
    Layout(Rect),
    /// Row heights of the grid changed
    RowHeightsChanged,
}

/// Serializable summary of the skin state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinSnapshot {
    pub row_count: usize,
    pub column_count: usize,
    pub fixed_rows: Vec<usize>,
    pub fixed_columns: Vec<ColumnId>,
    pub fixed_row_height: f64,
    pub fixed_column_width: f64,
    pub vertical_value: f64,
    pub vertical_max: f64,
    pub horizontal_value: f64,
    pub horizontal_max: f64,
    pub column_widths: Vec<(ColumnId, f64)>,
    pub rows: Vec<RowPlacement>,
    pub selected_rows: Vec<usize>,
    pub selected_columns: Vec<usize>,
    pub selected_row_span: Option<(usize, usize)>,
    pub selected_column_span: Option<(usize, usize)>,
    pub layout: Option<LayoutPlan>,
}

fn bar_moved(before: f64, after: f64) -> bool {
    before.to_bits() != after.to_bits()
}

/// Skin of a grid with pinned rows and columns
pub struct GridSkin<G, F, H = ColumnHeader, R = VerticalHeader>
where
    G: Grid,
    F: VirtualFlow,
    H: HeaderNode,
    R: RowHeaderView,
{
    config: GridConfig,
    grid: G,
    columns: Columns,
    flow: F,
    fixed: FixedRegionTracker,
    focus: Option<Box<dyn FocusModel>>,
    cell_factory: Option<Box<dyn CellFactory>>,
    measurement: MeasurementLayer,
    column_header: H,
    row_header: R,
    selection: SelectionIndices,
    vertical_header_width: f64,
    bounds: Rect,
    insets: Insets,
    plan: Option<LayoutPlan>,
}

impl<G: Grid, F: VirtualFlow> GridSkin<G, F> {
    /// Skin with the default column header and gutter
    pub fn new(config: GridConfig, grid: G, columns: Columns, flow: F) -> Self {
        let column_header = ColumnHeader::new(config.column_header_height);
        let row_header = VerticalHeader::new(config.vertical_header_width);
        Self::with_headers(config, grid, columns, flow, column_header, row_header)
    }
}

impl<G, F, H, R> GridSkin<G, F, H, R>
where
    G: Grid,
    F: VirtualFlow,
    H: HeaderNode,
    R: RowHeaderView,
{
    pub fn with_headers(
        config: GridConfig,
        grid: G,
        columns: Columns,
        flow: F,
        column_header: H,
        row_header: R,
    ) -> Self {
        let vertical_header_width = config.vertical_header_width;
        let mut skin = Self {
            config,
            grid,
            columns,
            flow,
            fixed: FixedRegionTracker::new(),
            focus: None,
            cell_factory: None,
            measurement: MeasurementLayer::new(),
            column_header,
            row_header,
            selection: SelectionIndices::new(),
            vertical_header_width,
            bounds: Rect::default(),
            insets: Insets::ZERO,
            plan: None,
        };
        skin.fixed.recompute_fixed_row_height(&skin.grid);
        skin.init_headers();
        skin.relayout();
        skin
    }

    #[must_use]
    pub fn with_focus_model(mut self, focus: impl FocusModel + 'static) -> Self {
        self.focus = Some(Box::new(focus));
        self
    }

    #[must_use]
    pub fn with_cell_factory(mut self, factory: impl CellFactory + 'static) -> Self {
        self.cell_factory = Some(Box::new(factory));
        self
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn set_focus_model(&mut self, focus: Option<Box<dyn FocusModel>>) {
        self.focus = focus;
    }

    pub fn set_cell_factory(&mut self, factory: Option<Box<dyn CellFactory>>) {
        self.cell_factory = factory;
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.layout_children();
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    fn header_context(&self) -> HeaderContext {
        HeaderContext {
            vertical_header_width: self.vertical_header_width,
            column_header_height: self.config.column_header_height,
            show_row_header: self.config.show_row_header,
            show_column_header: self.config.show_column_header,
        }
    }

    fn init_headers(&mut self) {
        let context = self.header_context();
        self.column_header.init(&context);
        self.row_header.init(&context);
    }

    /// Full relayout of the flow with the current pinned aggregates
    fn relayout(&mut self) {
        let region = self.fixed.pinned_region(&self.grid);
        self.flow
            .layout_total(&self.grid, &region, self.columns.total_width());
        self.vertical_scroll();
    }

    // Fixed rows

    /// Pin the row right after the pinned prefix. Out-of-range and already
    /// pinned rows are ignored; any other row is an error and nothing changes.
    pub fn fix_row(&mut self, row: usize) -> Result<bool> {
        let inserted = self.fixed.rows_mut().insert(row, self.grid.row_count())?;
        if inserted {
            self.fixed_rows_changed();
        }
        Ok(inserted)
    }

    /// Unpin the last row of the pinned prefix
    pub fn unfix_row(&mut self, row: usize) -> Result<bool> {
        let removed = self.fixed.rows_mut().remove(row)?;
        if removed {
            self.fixed_rows_changed();
        }
        Ok(removed)
    }

    /// Replace the pinned rows, returns how many were dropped as out of range.
    ///
    /// The rows must form the leading prefix `0..k`; on error nothing changes.
    pub fn set_fixed_rows<I: IntoIterator<Item = usize>>(&mut self, rows: I) -> Result<usize> {
        let dropped = self.fixed.rows_mut().replace(rows, self.grid.row_count())?;
        self.fixed_rows_changed();
        Ok(dropped)
    }

    pub fn clear_fixed_rows(&mut self) {
        self.fixed.rows_mut().clear();
        self.fixed_rows_changed();
    }

    fn fixed_rows_changed(&mut self) {
        let height = self.fixed.recompute_fixed_row_height(&self.grid);
        log::debug!(
            "[skin] fixed rows {:?}, height {height}",
            self.fixed.rows().iter().collect::<Vec<_>>()
        );
        self.relayout();
    }

    // Fixed columns

    /// Pin the leading columns. The ids must be exactly the first visible
    /// leaf columns; on error nothing changes.
    pub fn set_fixed_columns(&mut self, ids: &[ColumnId]) -> Result<()> {
        let previous = self.fixed.columns_mut().set(ids, &self.columns)?;
        self.fixed_columns_changed(previous);
        Ok(())
    }

    pub fn clear_fixed_columns(&mut self) {
        let previous = self.fixed.columns_mut().clear();
        self.fixed_columns_changed(previous);
    }

    fn fixed_columns_changed(&mut self, previous: usize) {
        let width = self.fixed.recompute_fixed_column_width(&self.columns);
        let current = self.fixed.columns().len();
        log::debug!("[skin] fixed columns {previous} -> {current}, width {width}");
        if current < previous {
            for cell in self.flow.cells_mut() {
                cell.put_fixed_columns_to_back();
            }
        }
        self.relayout();
    }

    // Model changes

    /// Re-read row heights after the grid changed them
    pub fn row_heights_changed(&mut self) {
        self.fixed_rows_changed();
    }

    /// Re-read a column's width after it changed
    pub fn column_width_changed(&mut self, id: ColumnId) {
        if self.fixed.columns().contains(id) {
            self.fixed.recompute_fixed_column_width(&self.columns);
        }
        self.relayout();
    }

    pub fn set_column_width(&mut self, id: ColumnId, width: f64) -> bool {
        let changed = self.columns.set_width(id, width);
        if changed {
            self.column_width_changed(id);
        }
        changed
    }

    // Events

    /// Dispatch one notification
    pub fn handle(&mut self, event: GridEvent) {
        log::trace!("[skin] {event:?}");
        match event {
            GridEvent::VerticalScroll(value) => self.drag_vertical(value),
            GridEvent::FocusPreviousCell => self.on_focus_previous_cell(),
            GridEvent::FocusNextCell => self.on_focus_next_cell(),
            GridEvent::SelectPreviousCell => self.on_select_previous_cell(),
            GridEvent::SelectNextCell => self.on_select_next_cell(),
            GridEvent::Layout(bounds) => {
                self.set_bounds(bounds);
            }
            GridEvent::RowHeightsChanged => self.row_heights_changed(),
        }
    }

    /// Move the vertical scrollbar; the overlay follows when the value changed
    pub fn drag_vertical(&mut self, value: f64) {
        if self.flow.set_vertical_value(value) {
            self.vertical_scroll();
        }
    }

    /// Reposition the pinned-row overlay for the current vertical value
    pub fn vertical_scroll(&mut self) {
        let placements = self.row_placements();
        let scroll_y = self.flow.vertical_bar().value();
        self.row_header
            .update_scroll_y(scroll_y, &placements, &self.selection);
    }

    /// Screen placement of every materialized row
    pub fn row_placements(&self) -> Vec<RowPlacement> {
        overlay_placements(self.flow.cells(), self.fixed.rows(), &self.grid)
    }

    /// Width available to the columns: skin width minus left and right insets
    pub fn header_width(&self) -> f64 {
        self.bounds.width - self.insets.horizontal()
    }

    /// Align the horizontal scrollbar on a column.
    ///
    /// Returns the applied value, `None` for a hidden or unknown column.
    pub fn scroll_horizontally(&mut self, column: ColumnId) -> Option<f64> {
        let fixed_width = self.fixed.fixed_column_width();
        let header_width = self.header_width();
        scroll_horizontally(
            &mut self.flow,
            &self.columns,
            column,
            fixed_width,
            header_width,
        )
    }

    fn scroll_to_focused_column(&mut self) {
        let column = self.focus.as_ref().and_then(|f| f.focused_column());
        if let Some(column) = column {
            self.scroll_horizontally(column);
        }
    }

    pub fn on_focus_previous_cell(&mut self) {
        self.focus_into_view();
    }

    pub fn on_focus_next_cell(&mut self) {
        self.focus_into_view();
    }

    /// Bring the focused row out from under the pinned band, then align its
    /// column
    fn focus_into_view(&mut self) {
        let Some(focus) = self.focus.as_ref() else {
            return;
        };
        let Some(row) = focus.focused_index() else {
            return;
        };

        let before = self.flow.vertical_bar().value();
        match focus_scroll(self.flow.cells(), self.fixed.rows(), row) {
            FocusScroll::ScrollToTop(row) => self.flow.scroll_to(row),
            FocusScroll::Show(row) => self.flow.show(row),
        }
        if bar_moved(before, self.flow.vertical_bar().value()) {
            self.vertical_scroll();
        }
        self.scroll_to_focused_column();
    }

    pub fn on_select_previous_cell(&mut self) {
        self.select_adjacent(Direction::Previous);
    }

    pub fn on_select_next_cell(&mut self) {
        self.select_adjacent(Direction::Next);
    }

    fn select_adjacent(&mut self, direction: Direction) {
        let Some(focus) = self.focus.as_ref() else {
            return;
        };
        let anchor = focus.focused_index();
        let before = self.flow.vertical_bar().value();
        self.flow.select_adjacent(direction, anchor);
        if bar_moved(before, self.flow.vertical_bar().value()) {
            self.vertical_scroll();
        }
        self.scroll_to_focused_column();
    }

    // Auto-size

    /// Fit a column to its content, sampling at most `limit` rows.
    ///
    /// `None` when there was nothing to measure; the column is left as is.
    pub fn resize_column_to_fit_content(
        &mut self,
        column: ColumnId,
        limit: SampleLimit,
    ) -> Option<FitResult> {
        let leaf = self.columns.get(column)?.clone();
        let request = FitRequest {
            grid: &self.grid,
            column: &leaf,
            sample_limit: limit,
            resize_policy: self.config.resize_policy,
            default_padding: self.config.default_cell_padding,
            date_min_width: self.config.date_cell_min_width,
        };
        let fit = fit_column_width(&request, self.cell_factory.as_deref(), &mut self.measurement)?;
        self.set_column_width(column, fit.width);
        Some(fit)
    }

    /// Fit a column using the configured sample limit
    pub fn resize(&mut self, column: ColumnId) -> Option<FitResult> {
        self.resize_column_to_fit_content(column, self.config.autosize_sample_limit)
    }

    // Layout

    /// Lay the skin out in new bounds
    pub fn set_bounds(&mut self, bounds: Rect) -> LayoutPlan {
        self.bounds = bounds;
        self.layout_children()
    }

    /// Position the headers and the body for the current bounds
    pub fn layout_children(&mut self) -> LayoutPlan {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let content = Rect::new(
            x + self.insets.left,
            y + self.insets.top,
            (width - self.insets.horizontal()).max(0.0),
            (height - self.insets.vertical()).max(0.0),
        );
        let plan = plan_layout(&LayoutInput {
            bounds: content,
            show_row_header: self.config.show_row_header,
            show_column_header: self.config.show_column_header,
            vertical_header_width: self.vertical_header_width,
            column_header_height: self.column_header.pref_height(),
            fixed_row_height: self.fixed.fixed_row_height(),
            fixed_column_width: self.fixed.fixed_column_width(),
        });

        self.flow.resize_relocate(plan.flow);
        if let Some(area) = plan.column_header {
            self.column_header
                .layout_in_area(area, plan.baseline_offset, HPos::Center, VPos::Center);
        }
        if let Some(area) = plan.row_header {
            self.row_header
                .layout_in_area(area, plan.baseline_offset, HPos::Center, VPos::Center);
        }
        self.vertical_scroll();
        self.plan = Some(plan);
        plan
    }

    /// Plan of the last layout pass
    pub fn last_layout(&self) -> Option<LayoutPlan> {
        self.plan
    }

    // Accessors

    pub fn fixed_row_height(&self) -> f64 {
        self.fixed.fixed_row_height()
    }

    pub fn fixed_column_width(&self) -> f64 {
        self.fixed.fixed_column_width()
    }

    pub fn fixed(&self) -> &FixedRegionTracker {
        &self.fixed
    }

    pub fn vertical_header_width(&self) -> f64 {
        self.vertical_header_width
    }

    pub fn set_vertical_header_width(&mut self, width: f64) {
        self.vertical_header_width = width;
        self.init_headers();
        self.layout_children();
    }

    /// Materialized row view at position `i`
    pub fn row(&self, i: usize) -> Option<&F::Row> {
        self.flow.cells().get(i)
    }

    /// Number of materialized row views
    pub fn cells_size(&self) -> usize {
        self.flow.cells().len()
    }

    pub fn hbar(&self) -> &ScrollBar {
        self.flow.horizontal_bar()
    }

    pub fn vbar(&self) -> &ScrollBar {
        self.flow.vertical_bar()
    }

    pub fn selection(&self) -> &SelectionIndices {
        &self.selection
    }

    /// Individually selected rows; range selections are spans on [`Self::selection`]
    pub fn selected_rows(&self) -> &BTreeSet<usize> {
        &self.selection.rows
    }

    pub fn selected_rows_mut(&mut self) -> &mut BTreeSet<usize> {
        &mut self.selection.rows
    }

    pub fn selected_columns(&self) -> &BTreeSet<usize> {
        &self.selection.columns
    }

    pub fn selected_columns_mut(&mut self) -> &mut BTreeSet<usize> {
        &mut self.selection.columns
    }

    /// Replace the highlighted indices with those covered by `selection`
    pub fn select(&mut self, selection: &Selection) {
        self.selection
            .apply(selection, self.grid.row_count(), self.columns.len());
        self.vertical_scroll();
    }

    pub fn pinned_region(&self) -> PinnedRegion {
        self.fixed.pinned_region(&self.grid)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Mutable grid; report height changes with [`Self::row_heights_changed`]
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn column_header(&self) -> &H {
        &self.column_header
    }

    pub fn row_header(&self) -> &R {
        &self.row_header
    }

    pub fn measurement_layer(&self) -> &MeasurementLayer {
        &self.measurement
    }

    pub fn snapshot(&self) -> SkinSnapshot {
        SkinSnapshot {
            row_count: self.grid.row_count(),
            column_count: self.columns.len(),
            fixed_rows: self.fixed.rows().iter().collect(),
            fixed_columns: self.fixed.columns().ids().to_vec(),
            fixed_row_height: self.fixed.fixed_row_height(),
            fixed_column_width: self.fixed.fixed_column_width(),
            vertical_value: self.vbar().value(),
            vertical_max: self.vbar().max(),
            horizontal_value: self.hbar().value(),
            horizontal_max: self.hbar().max(),
            column_widths: self.columns.widths(),
            rows: self.row_placements(),
            selected_rows: self.selection.rows.iter().copied().collect(),
            selected_columns: self.selection.columns.iter().copied().collect(),
            selected_row_span: self.selection.row_span,
            selected_column_span: self.selection.column_span,
            layout: self.plan,
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
    use crate::autosize::TextCellFactory;
    use crate::flow::{GridFlow, RowView};
    use crate::focus::FocusedCell;
    use crate::grid::GridModel;
    use crate::types::CellValue;

    fn skin() -> GridSkin<GridModel, GridFlow> {
        let grid = GridModel::blank(100, 10, 24.0);
        let columns = Columns::uniform(10, 50.0);
        let mut skin = GridSkin::new(GridConfig::default(), grid, columns, GridFlow::new(0.0, 0.0));
        skin.set_bounds(Rect::new(0.0, 0.0, 240.0, 264.0));
        skin
    }

    #[test]
    fn test_layout_sizes_flow() {
        let skin = skin();
        // 240 wide minus a 40px gutter, 264 high minus a 24px header
        assert_eq!(skin.flow().area(), Rect::new(40.0, 24.0, 200.0, 240.0));
        assert_eq!(skin.header_width(), 240.0);
        assert_eq!(skin.vbar().max(), 100.0 * 24.0 - 240.0);
        assert_eq!(skin.hbar().max(), 500.0 - 200.0);
    }

    #[test]
    fn test_fix_rows_recomputes_then_relayouts() {
        let mut skin = skin();
        let before = skin.flow().layout_count();
        assert!(skin.fix_row(0).unwrap());
        assert!(skin.fix_row(1).unwrap());
        assert!(!skin.fix_row(1).unwrap());
        assert!(!skin.fix_row(500).unwrap());
        assert_eq!(skin.fixed_row_height(), 48.0);
        assert_eq!(skin.flow().layout_count(), before + 2);
        assert_eq!(skin.flow().pinned_height(), 48.0);

        assert!(skin.unfix_row(1).unwrap());
        assert_eq!(skin.fixed_row_height(), 24.0);
        skin.clear_fixed_rows();
        assert_eq!(skin.fixed_row_height(), 0.0);
    }

    #[test]
    fn test_shrinking_fixed_columns_resets_overlays() {
        let mut skin = skin();
        skin.set_fixed_columns(&[ColumnId(0), ColumnId(1)]).unwrap();
        assert_eq!(skin.fixed_column_width(), 100.0);
        assert!(skin.row(0).unwrap().has_pinned_overlay());
        assert_eq!(skin.row(0).unwrap().overlay_resets(), 0);

        skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
        assert_eq!(skin.fixed_column_width(), 50.0);
        assert_eq!(skin.row(0).unwrap().overlay_resets(), 1);

        // Growing the set leaves overlays alone
        skin.set_fixed_columns(&[ColumnId(0), ColumnId(1)]).unwrap();
        assert_eq!(skin.row(0).unwrap().overlay_resets(), 1);

        skin.clear_fixed_columns();
        assert_eq!(skin.fixed_column_width(), 0.0);
        assert_eq!(skin.row(0).unwrap().overlay_resets(), 2);
        assert!(!skin.row(0).unwrap().has_pinned_overlay());
    }

    #[test]
    fn test_invalid_fixed_columns_leave_state() {
        let mut skin = skin();
        skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
        assert!(skin.set_fixed_columns(&[ColumnId(2)]).is_err());
        assert_eq!(skin.fixed().columns().ids(), &[ColumnId(0)]);
        assert_eq!(skin.fixed_column_width(), 50.0);
    }

    #[test]
    fn test_focus_behind_band_scrolls_to_top() {
        let mut skin = skin().with_focus_model(FocusedCell::at(50, ColumnId(0)));
        skin.set_fixed_rows([0, 1]).unwrap();
        skin.drag_vertical(51.0 * 24.0 - 48.0);
        assert_eq!(skin.row(2).unwrap().index(), 51);

        skin.handle(GridEvent::FocusPreviousCell);
        assert_eq!(skin.vbar().value(), 50.0 * 24.0 - 48.0);
        assert_eq!(skin.row(2).unwrap().index(), 50);
        assert_eq!(skin.row_header().scroll_y(), skin.vbar().value());
    }

    #[test]
    fn test_missing_focus_model_is_noop() {
        let mut skin = skin();
        skin.drag_vertical(300.0);
        skin.handle(GridEvent::FocusNextCell);
        skin.handle(GridEvent::SelectNextCell);
        assert_eq!(skin.vbar().value(), 300.0);
    }

    #[test]
    fn test_focus_aligns_column() {
        let mut skin = skin().with_focus_model(FocusedCell::at(3, ColumnId(8)));
        skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
        skin.handle(GridEvent::FocusNextCell);
        // start 400 - fixed 50
        assert_eq!(skin.hbar().value(), 300.0);
    }

    #[test]
    fn test_resize_fits_column_and_fixed_width() {
        let mut grid = GridModel::blank(5, 2, 24.0);
        grid.set_value(2, ColumnId(0), CellValue::from("a longer label"));
        let mut skin = GridSkin::new(
            GridConfig::default(),
            grid,
            Columns::uniform(2, 50.0),
            GridFlow::new(200.0, 200.0),
        )
        .with_cell_factory(TextCellFactory::new(7.0));
        skin.set_fixed_columns(&[ColumnId(0)]).unwrap();

        let fit = skin.resize(ColumnId(0)).unwrap();
        assert_eq!(fit.width, 14.0 * 7.0 + 10.0);
        assert_eq!(skin.columns().get(ColumnId(0)).unwrap().width, fit.width);
        assert_eq!(skin.fixed_column_width(), fit.width);
        assert_eq!(skin.measurement_layer().attached(), 0);
    }

    #[test]
    fn test_resize_without_factory_is_noop() {
        let mut skin = skin();
        assert!(skin.resize(ColumnId(0)).is_none());
        assert_eq!(skin.columns().get(ColumnId(0)).unwrap().width, 50.0);
    }

    #[test]
    fn test_selection_highlights_gutter() {
        let mut skin = skin();
        skin.select(&Selection::row_range(2, 3));
        assert_eq!(skin.selection().row_span, Some((2, 3)));
        assert!(skin.selected_rows().is_empty());
        let label = skin
            .row_header()
            .labels()
            .iter()
            .find(|l| l.row == 2)
            .unwrap();
        assert!(label.selected);
    }

    #[test]
    fn test_snapshot() {
        let mut skin = skin();
        skin.set_fixed_rows([0, 1, 400]).unwrap();
        let snapshot = skin.snapshot();
        assert_eq!(snapshot.fixed_rows, vec![0, 1]);
        assert_eq!(snapshot.fixed_row_height, 48.0);
        assert_eq!(snapshot.rows[0].y, 0.0);
        assert_eq!(snapshot.rows[1].y, 24.0);
        assert!(snapshot.layout.is_some());
        assert!(serde_json::to_string(&snapshot).is_ok());
    }
}
