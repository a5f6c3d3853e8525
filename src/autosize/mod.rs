//! Column auto-sizer.
//!
//! Fits a column to its content by binding one transient measurement cell to
//! each sampled row, measuring it while attached to the measurement layer,
//! and keeping the widest result. Each sample costs a style and measurement
//! pass, so callers bound the sample size on large grids.

mod text_cell;

pub use text_cell::{TextCell, TextCellFactory, DEFAULT_GLYPH_WIDTH};

use serde::Serialize;

use crate::config::SampleLimit;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::{CellValue, Insets, LeafColumn, ResizePolicy};

/// Transient cell used to measure content
pub trait MeasureCell {
    /// Bind the cell to `(column, row)`; `row = None` unbinds it so it no
    /// longer tracks any row.
    fn update_index(&mut self, column: &LeafColumn, row: Option<usize>, item: Option<&CellValue>);

    fn text(&self) -> Option<&str>;

    fn has_graphic(&self) -> bool;

    /// Value currently bound
    fn item(&self) -> Option<&CellValue>;

    /// Insets of the cell's visual node, when it has an inset-bearing node
    fn node_insets(&self) -> Option<Insets>;

    /// Style pass, run while the cell is attached
    fn process_css(&mut self);

    fn pref_width(&self) -> Result<f64>;
}

/// Produces measurement cells for a column
pub trait CellFactory {
    fn create(&self, column: &LeafColumn) -> Option<Box<dyn MeasureCell>>;
}

/// Layer that measurement cells are attached to while they are measured
#[derive(Debug, Default)]
pub struct MeasurementLayer {
    attached: usize,
}

impl MeasurementLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells currently attached
    pub fn attached(&self) -> usize {
        self.attached
    }

    fn attach(&mut self) -> Attached<'_> {
        self.attached += 1;
        Attached { layer: self }
    }
}

/// Detaches its cell when dropped, including on early exit
struct Attached<'a> {
    layer: &'a mut MeasurementLayer,
}

impl Drop for Attached<'_> {
    fn drop(&mut self) {
        self.layer.attached = self.layer.attached.saturating_sub(1);
    }
}

/// Inputs for fitting one column
#[derive(Clone, Copy)]
pub struct FitRequest<'a> {
    pub grid: &'a dyn Grid,
    pub column: &'a LeafColumn,
    pub sample_limit: SampleLimit,
    pub resize_policy: ResizePolicy,
    /// Padding used when the cell has no inset-bearing node
    pub default_padding: f64,
    /// Floor applied when a date was measured
    pub date_min_width: f64,
}

/// Outcome of fitting a column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Width to apply
    pub width: f64,
    /// Widest measured preferred width
    pub max_width: f64,
    pub padding: f64,
    /// Rows bound to the cell
    pub sampled: usize,
    /// Rows whose width was measured
    pub measured: usize,
    /// Rows whose measurement failed
    pub skipped: usize,
    pub date_present: bool,
}

/// Compute the best-fit width of a column.
///
/// `None` when there is nothing to measure: an empty grid, no factory, or a
/// factory that produces no cell.
pub fn fit_column_width(
    request: &FitRequest<'_>,
    factory: Option<&dyn CellFactory>,
    layer: &mut MeasurementLayer,
) -> Option<FitResult> {
    let FitRequest {
        grid,
        column,
        sample_limit,
        resize_policy,
        default_padding,
        date_min_width,
    } = *request;

    let item_count = grid.row_count();
    if item_count == 0 {
        return None;
    }
    let Some(factory) = factory else {
        log::debug!("[autosize] no cell factory for {}", column.id);
        return None;
    };
    let mut cell = factory.create(column)?;

    let padding = cell
        .node_insets()
        .map_or(default_padding, |insets| insets.horizontal());

    let rows = sample_limit.rows_for(item_count);
    let mut max_width: f64 = 0.0;
    let mut date_present = false;
    let mut measured = 0;
    let mut skipped = 0;

    for row in 0..rows {
        cell.update_index(column, Some(row), grid.value(row, column.id));

        let has_content = cell.text().is_some_and(|t| !t.is_empty()) || cell.has_graphic();
        if !has_content {
            continue;
        }

        let _attached = layer.attach();
        if cell.item().is_some_and(CellValue::is_date) {
            date_present = true;
        }
        cell.process_css();
        match cell.pref_width() {
            Ok(width) if width.is_finite() => {
                max_width = max_width.max(width);
                measured += 1;
            }
            Ok(width) => {
                log::warn!("[autosize] {} row {row}: unusable width {width}", column.id);
                skipped += 1;
            }
            Err(e) => {
                log::warn!("[autosize] {} row {row}: {e}", column.id);
                skipped += 1;
            }
        }
    }

    // Unbind so the cell stops tracking the last sampled row
    cell.update_index(column, None, None);

    let mut width = max_width + padding;
    if resize_policy == ResizePolicy::Constrained {
        width = width.max(column.width);
    }
    if date_present {
        width = width.max(date_min_width);
    }

    log::debug!(
        "[autosize] {}: {rows} rows sampled, max {max_width}, padding {padding} -> {width}",
        column.id
    );

    Some(FitResult {
        width,
        max_width,
        padding,
        sampled: rows,
        measured,
        skipped,
        date_present,
    })
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
    use crate::error::GridError;
    use crate::grid::GridModel;
    use crate::types::ColumnId;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Cell whose width is its text length, failing on configured rows
    struct StubCell {
        row: Option<usize>,
        item: Option<CellValue>,
        text: Option<String>,
        fail_rows: Vec<usize>,
        insets: Option<Insets>,
        unbound: Rc<Cell<bool>>,
    }

    impl MeasureCell for StubCell {
        fn update_index(&mut self, _column: &LeafColumn, row: Option<usize>, item: Option<&CellValue>) {
            self.row = row;
            self.item = item.cloned();
            self.text = item.and_then(CellValue::display_text);
            self.unbound.set(row.is_none());
        }
        fn text(&self) -> Option<&str> {
            self.text.as_deref()
        }
        fn has_graphic(&self) -> bool {
            false
        }
        fn item(&self) -> Option<&CellValue> {
            self.item.as_ref()
        }
        fn node_insets(&self) -> Option<Insets> {
            self.insets
        }
        fn process_css(&mut self) {}
        fn pref_width(&self) -> Result<f64> {
            match self.row {
                Some(row) if self.fail_rows.contains(&row) => Err(GridError::Measurement {
                    row: Some(row),
                    reason: "stub failure".into(),
                }),
                _ => Ok(self.text.as_ref().map_or(0.0, |t| t.len() as f64 * 10.0)),
            }
        }
    }

    struct StubFactory {
        fail_rows: Vec<usize>,
        insets: Option<Insets>,
        unbound: Rc<Cell<bool>>,
    }

    impl StubFactory {
        fn new() -> Self {
            Self {
                fail_rows: Vec::new(),
                insets: None,
                unbound: Rc::new(Cell::new(false)),
            }
        }
    }

    impl CellFactory for StubFactory {
        fn create(&self, _column: &LeafColumn) -> Option<Box<dyn MeasureCell>> {
            Some(Box::new(StubCell {
                row: None,
                item: None,
                text: None,
                fail_rows: self.fail_rows.clone(),
                insets: self.insets,
                unbound: Rc::clone(&self.unbound),
            }))
        }
    }

    struct NoCells;

    impl CellFactory for NoCells {
        fn create(&self, _column: &LeafColumn) -> Option<Box<dyn MeasureCell>> {
            None
        }
    }

    fn grid(texts: &[&str]) -> GridModel {
        GridModel::new(
            texts.iter().map(|t| vec![CellValue::from(*t)]).collect(),
            24.0,
        )
    }

    fn request<'a>(grid: &'a GridModel, column: &'a LeafColumn) -> FitRequest<'a> {
        FitRequest {
            grid,
            column,
            sample_limit: SampleLimit::Unlimited,
            resize_policy: ResizePolicy::Unconstrained,
            default_padding: 10.0,
            date_min_width: 105.0,
        }
    }

    #[test]
    fn test_widest_sample_plus_padding() {
        let grid = grid(&["ab", "abcdef", "", "abc"]);
        let column = LeafColumn::new(0, 200.0);
        let factory = StubFactory::new();
        let mut layer = MeasurementLayer::new();

        let fit = fit_column_width(&request(&grid, &column), Some(&factory), &mut layer).unwrap();
        assert_eq!(fit.max_width, 60.0);
        assert_eq!(fit.padding, 10.0);
        assert_eq!(fit.width, 70.0);
        assert_eq!(fit.sampled, 4);
        assert_eq!(fit.measured, 3);
        assert_eq!(layer.attached(), 0);
        assert!(factory.unbound.get());
    }

    #[test]
    fn test_sample_limit_bounds_rows() {
        let grid = grid(&["a", "a", "abcdefghij"]);
        let column = LeafColumn::new(0, 10.0);
        let mut req = request(&grid, &column);
        req.sample_limit = SampleLimit::Rows(2);
        let fit = fit_column_width(&req, Some(&StubFactory::new()), &mut MeasurementLayer::new())
            .unwrap();
        assert_eq!(fit.sampled, 2);
        assert_eq!(fit.width, 20.0);
    }

    #[test]
    fn test_node_insets_replace_default_padding() {
        let grid = grid(&["abc"]);
        let column = LeafColumn::new(0, 10.0);
        let mut factory = StubFactory::new();
        factory.insets = Some(Insets {
            top: 1.0,
            right: 4.0,
            bottom: 1.0,
            left: 2.0,
        });
        let fit = fit_column_width(&request(&grid, &column), Some(&factory), &mut MeasurementLayer::new())
            .unwrap();
        assert_eq!(fit.padding, 6.0);
        assert_eq!(fit.width, 36.0);
    }

    #[test]
    fn test_constrained_policy_never_shrinks() {
        let grid = grid(&["ab"]);
        let column = LeafColumn::new(0, 150.0);
        let mut req = request(&grid, &column);
        req.resize_policy = ResizePolicy::Constrained;
        let fit = fit_column_width(&req, Some(&StubFactory::new()), &mut MeasurementLayer::new())
            .unwrap();
        assert_eq!(fit.width, 150.0);
    }

    #[test]
    fn test_date_floor() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let grid = GridModel::new(vec![vec![CellValue::from("a")], vec![CellValue::Date(date)]], 24.0);
        let column = LeafColumn::new(0, 10.0);
        let fit = fit_column_width(&request(&grid, &column), Some(&StubFactory::new()), &mut MeasurementLayer::new())
            .unwrap();
        assert!(fit.date_present);
        assert_eq!(fit.width, 105.0);
    }

    #[test]
    fn test_failed_samples_are_skipped() {
        let grid = grid(&["abcdefghij", "abc", "abcd"]);
        let column = LeafColumn::new(0, 10.0);
        let mut factory = StubFactory::new();
        factory.fail_rows = vec![0];
        let mut layer = MeasurementLayer::new();
        let fit = fit_column_width(&request(&grid, &column), Some(&factory), &mut layer).unwrap();
        assert_eq!(fit.skipped, 1);
        assert_eq!(fit.measured, 2);
        assert_eq!(fit.width, 50.0);
        assert_eq!(layer.attached(), 0);
    }

    #[test]
    fn test_noops() {
        let column = LeafColumn::new(0, 10.0);
        let empty = GridModel::default();
        let mut layer = MeasurementLayer::new();
        assert!(fit_column_width(&request(&empty, &column), Some(&StubFactory::new()), &mut layer).is_none());

        let grid = grid(&["abc"]);
        assert!(fit_column_width(&request(&grid, &column), None, &mut layer).is_none());
        assert!(fit_column_width(&request(&grid, &column), Some(&NoCells), &mut layer).is_none());
    }

    #[test]
    fn test_empty_column_gets_padding_only() {
        let grid = GridModel::blank(3, 1, 24.0);
        let column = LeafColumn::new(0, 80.0);
        let fit = fit_column_width(&request(&grid, &column), Some(&StubFactory::new()), &mut MeasurementLayer::new())
            .unwrap();
        assert_eq!(fit.measured, 0);
        assert_eq!(fit.width, 10.0);
        assert_eq!(column.id, ColumnId(0));
    }
}
