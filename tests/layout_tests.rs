//! Layout tests
//!
//! Placement of the column header, the row header (gutter) and the flow for
//! each combination of header visibility, insets and pinned regions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::uniform_skin;
use gridview::layout::{plan_layout, LayoutInput};
use gridview::{
    ColumnId, Columns, GridConfig, GridEvent, GridFlow, GridModel, GridSkin, Insets, Rect,
};
use test_case::test_case;

fn skin_with(show_row_header: bool, show_column_header: bool) -> GridSkin<GridModel, GridFlow> {
    let config = GridConfig {
        show_row_header,
        show_column_header,
        ..GridConfig::default()
    };
    let mut skin = GridSkin::new(
        config,
        GridModel::blank(100, 10, 24.0),
        Columns::uniform(10, 80.0),
        GridFlow::new(0.0, 0.0),
    );
    skin.handle(GridEvent::Layout(Rect::new(0.0, 0.0, 640.0, 480.0)));
    skin
}

#[test_case(true, true, Rect::new(40.0, 24.0, 600.0, 456.0) ; "both headers")]
#[test_case(true, false, Rect::new(40.0, 0.0, 600.0, 480.0) ; "row header only")]
#[test_case(false, true, Rect::new(0.0, 24.0, 640.0, 456.0) ; "column header only")]
#[test_case(false, false, Rect::new(0.0, 0.0, 640.0, 480.0) ; "no headers")]
fn test_flow_area(row_header: bool, column_header: bool, expected: Rect) {
    let skin = skin_with(row_header, column_header);
    assert_eq!(skin.flow().area(), expected);
    assert_eq!(skin.last_layout().unwrap().flow, expected);
}

#[test]
fn test_headers_are_placed() {
    let skin = skin_with(true, true);
    let header = skin.column_header().placement().unwrap();
    assert_eq!(header.area, Rect::new(40.0, 0.0, 600.0, 24.0));
    assert_eq!(header.baseline_offset, 240.0);

    let gutter = skin.row_header().placement().unwrap();
    assert_eq!(gutter.area, Rect::new(0.0, 0.0, 600.0, 480.0));
}

#[test]
fn test_hidden_headers_are_not_placed() {
    let skin = skin_with(false, false);
    assert!(skin.column_header().placement().is_none());
    assert!(skin.row_header().placement().is_none());
}

#[test]
fn test_layout_is_repeatable() {
    let mut skin = skin_with(true, true);
    let first = skin.layout_children();
    let second = skin.layout_children();
    assert_eq!(first, second);
    assert_eq!(skin.column_header().layout_count(), 3);
}

#[test]
fn test_insets_shrink_content() {
    let mut skin = skin_with(true, true);
    skin.set_insets(Insets::uniform(5.0));
    assert_eq!(skin.flow().area(), Rect::new(45.0, 29.0, 590.0, 446.0));
}

#[test]
fn test_vertical_header_width_change() {
    let mut skin = skin_with(true, true);
    skin.set_vertical_header_width(60.0);
    assert_eq!(skin.vertical_header_width(), 60.0);
    assert_eq!(skin.row_header().width(), 60.0);
    assert_eq!(skin.flow().area().x, 60.0);
    assert_eq!(skin.flow().area().width, 580.0);
}

#[test]
fn test_pinned_bands_in_plan() {
    let mut skin = uniform_skin(100, 10, 24.0, 50.0);
    skin.set_fixed_rows([0, 1]).unwrap();
    skin.set_fixed_columns(&[ColumnId(0), ColumnId(1)]).unwrap();
    let plan = skin.layout_children();
    assert_eq!(plan.pinned_rows, Some(Rect::new(40.0, 24.0, 200.0, 48.0)));
    assert_eq!(plan.pinned_columns, Some(Rect::new(40.0, 24.0, 100.0, 240.0)));
}

#[test]
fn test_resizing_bounds_updates_scroll_range() {
    let mut skin = skin_with(false, false);
    assert_eq!(skin.vbar().max(), 2400.0 - 480.0);
    skin.handle(GridEvent::VerticalScroll(1900.0));

    skin.handle(GridEvent::Layout(Rect::new(0.0, 0.0, 640.0, 960.0)));
    assert_eq!(skin.vbar().max(), 2400.0 - 960.0);
    assert_eq!(skin.vbar().value(), 2400.0 - 960.0);
    assert_eq!(skin.hbar().max(), 800.0 - 640.0);
}

#[test]
fn test_plan_is_pure() {
    let input = LayoutInput {
        bounds: Rect::new(10.0, 10.0, 300.0, 200.0),
        show_row_header: true,
        show_column_header: true,
        vertical_header_width: 40.0,
        column_header_height: 30.0,
        fixed_row_height: 0.0,
        fixed_column_width: 0.0,
    };
    let plan = plan_layout(&input);
    assert_eq!(plan.column_header, Some(Rect::new(50.0, 10.0, 260.0, 30.0)));
    assert_eq!(plan.row_header, Some(Rect::new(10.0, 10.0, 260.0, 200.0)));
    assert_eq!(plan.flow, Rect::new(50.0, 40.0, 260.0, 170.0));
    for _ in 0..3 {
        assert_eq!(plan_layout(&input), plan);
    }
}
