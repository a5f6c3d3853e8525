//! Focus and selection navigation tests
//!
//! Moving focus must never leave the focused row hidden behind the pinned
//! rows.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_close, materialized, uniform_skin, Skin};
use gridview::focus::{focus_scroll, FocusScroll};
use gridview::{ColumnId, FocusedCell, GridEvent, RowView, VirtualFlow};

/// 100 rows of 24px, rows 0 and 1 pinned, ten rows visible
fn pinned_skin() -> Skin {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    skin.set_fixed_rows([0, 1]).unwrap();
    skin
}

fn focus(skin: &mut Skin, row: usize) {
    skin.set_focus_model(Some(Box::new(FocusedCell::at(row, ColumnId(0)))));
}

/// Screen y of a row inside the flow
fn screen_y(skin: &Skin, row: usize) -> f64 {
    skin.row_placements()
        .iter()
        .find(|p| p.index == row)
        .map(|p| p.y)
        .unwrap_or_else(|| panic!("row {row} not materialized"))
}

#[test]
fn test_pinned_scenario() {
    let mut skin = pinned_skin();
    assert_close(skin.fixed_row_height(), 48.0);

    // Scroll so rows 49 and 50 sit behind the pinned band
    skin.handle(GridEvent::VerticalScroll(51.0 * 24.0 - 48.0));
    assert_eq!(skin.row(2).unwrap().index(), 51);

    let decision = focus_scroll(skin.flow().cells(), skin.fixed().rows(), 50);
    assert_eq!(decision, FocusScroll::ScrollToTop(50));

    focus(&mut skin, 50);
    skin.handle(GridEvent::FocusPreviousCell);
    assert_eq!(skin.row(2).unwrap().index(), 50);
    assert_close(screen_y(&skin, 50), 48.0);
}

#[test]
fn test_focus_below_band_scrolls_minimally() {
    let mut skin = pinned_skin();
    focus(&mut skin, 20);
    skin.handle(GridEvent::FocusNextCell);

    // Bottom-aligned: row 20 ends at the viewport bottom
    assert_close(screen_y(&skin, 20) + 24.0, 240.0);
    assert_eq!(materialized(&skin)[..2], [0, 1]);
}

#[test]
fn test_visible_focus_does_not_scroll() {
    let mut skin = pinned_skin();
    focus(&mut skin, 5);
    skin.handle(GridEvent::FocusNextCell);
    assert_eq!(skin.vbar().value(), 0.0);
}

#[test]
fn test_pinned_focus_does_not_scroll() {
    let mut skin = pinned_skin();
    skin.handle(GridEvent::VerticalScroll(600.0));
    focus(&mut skin, 1);
    skin.handle(GridEvent::FocusPreviousCell);
    assert_eq!(skin.vbar().value(), 600.0);
    assert_close(screen_y(&skin, 1), 24.0);
}

#[test]
fn test_focus_never_hidden_behind_band() {
    for value in [0.0, 100.0, 517.0, 1200.0, 2000.0] {
        for target in [2, 3, 10, 30, 50, 70, 99] {
            let mut skin = pinned_skin();
            skin.handle(GridEvent::VerticalScroll(value));
            focus(&mut skin, target);
            skin.handle(GridEvent::FocusPreviousCell);
            let y = screen_y(&skin, target);
            assert!(
                y >= skin.fixed_row_height() && y + 24.0 <= 240.0,
                "row {target} at {y} after focus from value {value}"
            );
        }
    }
}

#[test]
fn test_gutter_follows_focus_scroll() {
    let mut skin = pinned_skin();
    skin.handle(GridEvent::VerticalScroll(51.0 * 24.0 - 48.0));
    focus(&mut skin, 50);
    skin.handle(GridEvent::FocusPreviousCell);

    let labels = skin.row_header().labels();
    assert_eq!(labels[0].text, "1");
    assert_eq!(labels[1].text, "2");
    assert_eq!(labels[2].text, "51");
    assert_close(skin.row_header().scroll_y(), skin.vbar().value());
}

#[test]
fn test_select_next_moves_past_viewport() {
    let mut skin = pinned_skin();
    // Row 11 ends at 288, past the 240px viewport
    focus(&mut skin, 10);
    skin.handle(GridEvent::SelectNextCell);
    assert_close(screen_y(&skin, 11) + 24.0, 240.0);
}

#[test]
fn test_select_previous_into_band() {
    let mut skin = pinned_skin();
    skin.handle(GridEvent::VerticalScroll(300.0));
    // First scrollable row on screen is 14; 13 is behind the band
    focus(&mut skin, 14);
    skin.handle(GridEvent::SelectPreviousCell);
    assert_close(screen_y(&skin, 13), 48.0);
}

#[test]
fn test_missing_focus_model_is_noop() {
    let mut skin = pinned_skin();
    skin.handle(GridEvent::VerticalScroll(300.0));
    for event in [
        GridEvent::FocusNextCell,
        GridEvent::FocusPreviousCell,
        GridEvent::SelectNextCell,
        GridEvent::SelectPreviousCell,
    ] {
        skin.handle(event);
    }
    assert_eq!(skin.vbar().value(), 300.0);
    assert_eq!(skin.hbar().value(), 0.0);
}

#[test]
fn test_select_without_focused_row_is_noop() {
    let mut skin = pinned_skin();
    skin.handle(GridEvent::VerticalScroll(300.0));
    skin.set_focus_model(Some(Box::new(FocusedCell::default())));
    skin.handle(GridEvent::SelectPreviousCell);
    skin.handle(GridEvent::SelectNextCell);
    assert_eq!(skin.vbar().value(), 300.0);
}

#[test]
fn test_gapped_pin_cannot_hide_leading_rows() {
    let mut skin = uniform_skin(100, 4, 24.0, 50.0);
    assert!(skin.set_fixed_rows([5]).is_err());
    assert!(skin.fix_row(5).is_err());
    assert!(skin.fixed().rows().is_empty());

    focus(&mut skin, 0);
    skin.handle(GridEvent::FocusNextCell);
    assert!(materialized(&skin).contains(&0));
    assert_close(screen_y(&skin, 0), 0.0);
}

#[test]
fn test_focus_after_grid_shrinks_uses_live_band() {
    let mut skin = uniform_skin(20, 4, 24.0, 50.0);
    skin.set_fixed_rows(0..15).unwrap();
    skin.grid_mut().truncate(10);
    skin.row_heights_changed();
    assert_eq!(skin.fixed().rows().len(), 10);

    // Every remaining row is pinned, so focus stays in the band
    focus(&mut skin, 9);
    skin.handle(GridEvent::FocusPreviousCell);
    assert_eq!(skin.vbar().value(), 0.0);
    assert_close(screen_y(&skin, 9), 216.0);
}
