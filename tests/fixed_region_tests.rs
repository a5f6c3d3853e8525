//! Fixed region tests
//!
//! Aggregate height and width of the pinned rows and columns, how they react
//! to model changes, and the relayout that follows each change.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_close, columns, uniform_skin};
use gridview::{CellValue, ColumnId, GridError, GridEvent, RowView};
use test_case::test_case;

#[test_case(&[0, 1], 48.0 ; "two leading rows")]
#[test_case(&[2, 0, 1], 72.0 ; "unordered prefix")]
#[test_case(&[], 0.0 ; "no rows")]
#[test_case(&[0, 1, 100, 250], 48.0 ; "out of range dropped")]
fn test_aggregate_height(rows: &[usize], expected: f64) {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.set_fixed_rows(rows.iter().copied()).unwrap();
    assert_close(skin.fixed_row_height(), expected);
}

#[test_case(&[5, 9, 40], 5, 0 ; "scattered rows")]
#[test_case(&[0, 1, 3], 3, 2 ; "gap after prefix")]
#[test_case(&[1], 1, 0 ; "missing first row")]
fn test_non_prefix_rows_rejected(rows: &[usize], row: usize, expected: usize) {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.set_fixed_rows([0]).unwrap();
    let layouts = skin.flow().layout_count();

    let err = skin.set_fixed_rows(rows.iter().copied()).unwrap_err();
    match err {
        GridError::NonContiguousFixedRows { row: r, expected: e } => {
            assert_eq!((r, e), (row, expected));
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(skin.fixed().rows().iter().collect::<Vec<_>>(), vec![0]);
    assert_close(skin.fixed_row_height(), 24.0);
    assert_eq!(skin.flow().layout_count(), layouts);
}

#[test]
fn test_aggregate_height_uses_row_heights() {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.grid_mut().set_row_height(1, 60.0);
    skin.handle(GridEvent::RowHeightsChanged);
    skin.set_fixed_rows([0, 1, 2]).unwrap();
    assert_close(skin.fixed_row_height(), 108.0);

    // Changing a pinned row's height updates the aggregate
    skin.grid_mut().set_row_height(2, 30.0);
    skin.row_heights_changed();
    assert_close(skin.fixed_row_height(), 114.0);
}

#[test]
fn test_emptying_rows_yields_zero() {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.set_fixed_rows([0, 1, 2]).unwrap();
    skin.clear_fixed_rows();
    assert_eq!(skin.fixed_row_height(), 0.0);
    assert_eq!(skin.flow().pinned_height(), 0.0);
}

#[test]
fn test_freeze_unfreeze_round_trip() {
    let mut skin = uniform_skin(100, 6, 24.0, 50.0);
    skin.set_fixed_rows([0]).unwrap();
    skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
    let (height, width) = (skin.fixed_row_height(), skin.fixed_column_width());

    assert!(skin.fix_row(1).unwrap());
    assert!(skin.fix_row(2).unwrap());
    skin.set_fixed_columns(&[ColumnId(0), ColumnId(1), ColumnId(2)])
        .unwrap();
    assert_close(skin.fixed_row_height(), 72.0);
    assert_close(skin.fixed_column_width(), 150.0);

    assert!(skin.unfix_row(2).unwrap());
    assert!(skin.unfix_row(1).unwrap());
    skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
    assert_eq!(skin.fixed_row_height(), height);
    assert_eq!(skin.fixed_column_width(), width);
}

#[test]
fn test_each_change_relayouts_once() {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    let start = skin.flow().layout_count();

    assert!(skin.fix_row(0).unwrap());
    assert_eq!(skin.flow().layout_count(), start + 1);
    skin.set_fixed_rows([0, 1, 2]).unwrap();
    assert_eq!(skin.flow().layout_count(), start + 2);
    skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
    assert_eq!(skin.flow().layout_count(), start + 3);

    // Rejected changes do not relayout
    assert!(!skin.unfix_row(50).unwrap());
    assert!(skin.unfix_row(0).is_err());
    assert!(skin.fix_row(7).is_err());
    assert!(skin.set_fixed_columns(&[ColumnId(3)]).is_err());
    assert_eq!(skin.flow().layout_count(), start + 3);
}

#[test]
fn test_flow_sees_aggregate_before_relayout() {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.set_fixed_rows([0, 1]).unwrap();
    let region = skin.pinned_region();
    assert_eq!(region.rows, vec![0, 1]);
    assert_eq!(region.height, 48.0);
    assert_eq!(skin.flow().pinned_height(), region.height);
}

#[test]
fn test_fixed_column_width_skips_hidden() {
    let mut widths = columns(&[30.0, 40.0, 50.0, 60.0]);
    widths.get_mut(ColumnId(1)).unwrap().visible = false;
    let mut skin = common::headless_skin(
        gridview::GridModel::blank(10, 4, 24.0),
        widths,
        common::BOUNDS,
    );
    skin.set_fixed_columns(&[ColumnId(0), ColumnId(2)]).unwrap();
    assert_close(skin.fixed_column_width(), 80.0);

    let err = skin.set_fixed_columns(&[ColumnId(0), ColumnId(1)]).unwrap_err();
    assert!(matches!(err, GridError::NonContiguousFixedColumns { .. }));
}

#[test]
fn test_pinned_column_resize_updates_width() {
    let mut skin = uniform_skin(10, 4, 24.0, 50.0);
    skin.set_fixed_columns(&[ColumnId(0), ColumnId(1)]).unwrap();
    assert!(skin.set_column_width(ColumnId(1), 90.0));
    assert_close(skin.fixed_column_width(), 140.0);

    // A scrollable column does not change the pinned width
    assert!(skin.set_column_width(ColumnId(3), 10.0));
    assert_close(skin.fixed_column_width(), 140.0);
}

#[test]
fn test_shrinking_columns_resets_every_overlay() {
    let mut skin = uniform_skin(100, 6, 24.0, 50.0);
    skin.set_fixed_columns(&[ColumnId(0), ColumnId(1), ColumnId(2)])
        .unwrap();
    let before: Vec<usize> = (0..skin.cells_size())
        .map(|i| skin.row(i).unwrap().overlay_resets())
        .collect();

    skin.set_fixed_columns(&[ColumnId(0)]).unwrap();
    for i in 0..skin.cells_size() {
        let row = skin.row(i).unwrap();
        assert_eq!(
            row.overlay_resets(),
            before[i] + 1,
            "row {} was not reset",
            row.index()
        );
    }
}

#[test]
fn test_shrunk_grid_drops_stale_pinned_rows() {
    let mut skin = uniform_skin(20, 2, 24.0, 50.0);
    skin.set_fixed_rows(0..16).unwrap();
    assert_close(skin.fixed_row_height(), 384.0);

    skin.grid_mut().truncate(10);
    skin.row_heights_changed();
    assert_eq!(skin.fixed().rows().len(), 10);
    assert_close(skin.fixed_row_height(), 240.0);
    assert_eq!(skin.pinned_region().rows, (0..10).collect::<Vec<_>>());
    let snapshot = skin.snapshot();
    assert_eq!(snapshot.row_count, 10);
    assert_eq!(snapshot.fixed_rows, (0..10).collect::<Vec<_>>());

    // Growing the grid back does not re-pin the dropped rows
    for _ in 0..10 {
        skin.grid_mut().push_row(vec![CellValue::Empty; 2]);
    }
    skin.row_heights_changed();
    assert_eq!(skin.fixed().rows().len(), 10);
    assert_close(skin.fixed_row_height(), 240.0);
    assert_eq!(skin.snapshot().fixed_rows.len(), 10);
}
