//! Common test utilities for the gridview integration tests.
//!
//! Builds skins over the in-memory grid and flow, plus a few assertion
//! helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::{
    CellValue, Columns, GridConfig, GridFlow, GridModel, GridSkin, LeafColumn, Rect,
};

pub type Skin = GridSkin<GridModel, GridFlow>;

/// Skin bounds used by most tests: 40px gutter + 200px of columns, 24px
/// column header + 240px of rows (ten 24px rows).
pub const BOUNDS: Rect = Rect::new(0.0, 0.0, 240.0, 264.0);

/// Skin over `rows` x `cols` empty cells, laid out in [`BOUNDS`]
#[must_use]
pub fn uniform_skin(rows: usize, cols: usize, row_height: f64, col_width: f64) -> Skin {
    let mut skin = GridSkin::new(
        GridConfig::default(),
        GridModel::blank(rows, cols, row_height),
        Columns::uniform(cols, col_width),
        GridFlow::new(0.0, 0.0),
    );
    skin.set_bounds(BOUNDS);
    skin
}

/// Skin without headers, so the flow covers the whole bounds
#[must_use]
pub fn headless_skin(grid: GridModel, columns: Columns, bounds: Rect) -> Skin {
    let config = GridConfig {
        show_row_header: false,
        show_column_header: false,
        ..GridConfig::default()
    };
    let mut skin = GridSkin::new(config, grid, columns, GridFlow::new(0.0, 0.0));
    skin.set_bounds(bounds);
    skin
}

/// Grid with one text column
#[must_use]
pub fn text_column(values: &[&str]) -> GridModel {
    GridModel::new(
        values.iter().map(|v| vec![CellValue::from(*v)]).collect(),
        24.0,
    )
}

/// Columns with the given widths
#[must_use]
pub fn columns(widths: &[f64]) -> Columns {
    Columns::new(
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| LeafColumn::new(i, *w))
            .collect(),
    )
}

/// Indices of the materialized rows, in display order
#[must_use]
pub fn materialized(skin: &Skin) -> Vec<usize> {
    skin.flow().materialized_indices()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
