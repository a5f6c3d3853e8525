//! Column auto-size tests
//!
//! Fitting a column to its sampled content through the skin, with the
//! reference text cells and with cells that fail to measure.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use chrono::NaiveDate;
use common::{assert_close, columns, headless_skin, text_column, Skin};
use gridview::{
    CellFactory, CellValue, ColumnId, GridConfig, GridError, GridFlow, GridModel, GridSkin,
    Insets, LeafColumn, MeasureCell, Rect, ResizePolicy, SampleLimit, TextCellFactory,
};
use test_case::test_case;

fn text_skin(values: &[&str]) -> Skin {
    headless_skin(
        text_column(values),
        columns(&[80.0]),
        Rect::new(0.0, 0.0, 400.0, 240.0),
    )
    .with_cell_factory(TextCellFactory::new(7.0))
}

#[test_case(&["a", "abc", "ab"], 31.0 ; "short text")]
#[test_case(&["", "", "hello world"], 87.0 ; "blank rows skipped")]
#[test_case(&["日本語"], 52.0 ; "wide glyphs")]
fn test_width_is_max_plus_padding(values: &[&str], expected: f64) {
    let mut skin = text_skin(values);
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_close(fit.width, expected);
    assert!(fit.width >= fit.max_width + fit.padding);
    assert_close(skin.columns().get(ColumnId(0)).unwrap().width, expected);
}

#[test]
fn test_date_floor() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let grid = GridModel::new(
        vec![vec![CellValue::from("x")], vec![CellValue::Date(date)]],
        24.0,
    );
    let mut skin = headless_skin(grid, columns(&[20.0]), Rect::new(0.0, 0.0, 400.0, 240.0))
        .with_cell_factory(TextCellFactory::new(7.0));
    let fit = skin.resize(ColumnId(0)).unwrap();
    // "2024-03-09" is 80px with padding, below the floor
    assert!(fit.date_present);
    assert_close(fit.width, 105.0);
}

#[test]
fn test_wide_date_column_exceeds_floor() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let grid = GridModel::new(vec![vec![CellValue::Date(date)]], 24.0);
    let mut skin = headless_skin(grid, columns(&[20.0]), Rect::new(0.0, 0.0, 400.0, 240.0))
        .with_cell_factory(TextCellFactory::new(12.0));
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_close(fit.width, 130.0);
}

#[test]
fn test_constrained_policy_never_shrinks() {
    let config = GridConfig {
        resize_policy: ResizePolicy::Constrained,
        show_row_header: false,
        show_column_header: false,
        ..GridConfig::default()
    };
    let mut skin = GridSkin::new(
        config,
        text_column(&["ab"]),
        columns(&[120.0]),
        GridFlow::new(400.0, 240.0),
    )
    .with_cell_factory(TextCellFactory::new(7.0));
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_close(fit.width, 120.0);

    skin.set_column_width(ColumnId(0), 10.0);
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_close(fit.width, 24.0);
}

#[test]
fn test_sample_limit() {
    let mut values = vec!["a"; 1500];
    values.push("a much longer value at the end");
    let mut skin = text_skin(&values);

    // Default config samples the first 1000 rows only
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_eq!(fit.sampled, 1000);
    assert_close(fit.width, 17.0);

    let fit = skin
        .resize_column_to_fit_content(ColumnId(0), SampleLimit::Unlimited)
        .unwrap();
    assert_eq!(fit.sampled, 1501);
    assert_close(fit.width, 30.0 * 7.0 + 10.0);
}

#[test]
fn test_cell_insets_replace_padding() {
    let mut skin = headless_skin(
        text_column(&["abcd"]),
        columns(&[80.0]),
        Rect::new(0.0, 0.0, 400.0, 240.0),
    )
    .with_cell_factory(TextCellFactory::new(10.0).with_insets(Insets {
        top: 0.0,
        right: 3.0,
        bottom: 0.0,
        left: 3.0,
    }));
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_close(fit.padding, 6.0);
    // Text 40 + own insets 6, then padding 6
    assert_close(fit.width, 52.0);
}

#[test]
fn test_noops() {
    // Empty grid
    let mut skin = headless_skin(
        GridModel::default(),
        columns(&[80.0]),
        Rect::new(0.0, 0.0, 400.0, 240.0),
    )
    .with_cell_factory(TextCellFactory::new(7.0));
    assert!(skin.resize(ColumnId(0)).is_none());

    // No factory
    let mut skin = headless_skin(
        text_column(&["abc"]),
        columns(&[80.0]),
        Rect::new(0.0, 0.0, 400.0, 240.0),
    );
    assert!(skin.resize(ColumnId(0)).is_none());
    assert_eq!(skin.columns().get(ColumnId(0)).unwrap().width, 80.0);

    // Unknown column
    let mut skin = text_skin(&["abc"]);
    assert!(skin.resize(ColumnId(9)).is_none());
}

/// Cell that fails to measure every other row
struct Flaky {
    row: Option<usize>,
    text: Option<String>,
}

impl MeasureCell for Flaky {
    fn update_index(&mut self, _column: &LeafColumn, row: Option<usize>, item: Option<&CellValue>) {
        self.row = row;
        self.text = item.and_then(CellValue::display_text);
    }
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
    fn has_graphic(&self) -> bool {
        false
    }
    fn item(&self) -> Option<&CellValue> {
        None
    }
    fn node_insets(&self) -> Option<Insets> {
        None
    }
    fn process_css(&mut self) {}
    fn pref_width(&self) -> gridview::Result<f64> {
        match self.row {
            Some(row) if row % 2 == 0 => Err(GridError::Measurement {
                row: Some(row),
                reason: "flaky".into(),
            }),
            _ => Ok(self.text.as_ref().map_or(0.0, |t| t.len() as f64)),
        }
    }
}

struct FlakyFactory;

impl CellFactory for FlakyFactory {
    fn create(&self, _column: &LeafColumn) -> Option<Box<dyn MeasureCell>> {
        Some(Box::new(Flaky {
            row: None,
            text: None,
        }))
    }
}

#[test]
fn test_failed_measurements_do_not_abort() {
    let mut skin = headless_skin(
        text_column(&["xxxxxxxxxxxxxxxxxxxx", "xx", "xxxxxxxxxx", "xxxx"]),
        columns(&[80.0]),
        Rect::new(0.0, 0.0, 400.0, 240.0),
    )
    .with_cell_factory(FlakyFactory);
    let fit = skin.resize(ColumnId(0)).unwrap();
    assert_eq!(fit.skipped, 2);
    assert_eq!(fit.measured, 2);
    assert_close(fit.width, 14.0);
    assert_eq!(skin.measurement_layer().attached(), 0);
}
