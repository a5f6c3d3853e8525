//! Layout orchestrator: places the column header, the gutter and the body.

use serde::Serialize;

use crate::types::Rect;

/// Everything the layout pass depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// Skin content bounds (insets already removed)
    pub bounds: Rect,
    pub show_row_header: bool,
    pub show_column_header: bool,
    pub vertical_header_width: f64,
    /// Preferred height of the column header
    pub column_header_height: f64,
    pub fixed_row_height: f64,
    pub fixed_column_width: f64,
}

/// Where every child goes for one layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPlan {
    /// Body area: column header plus flow
    pub body: Rect,
    pub column_header: Option<Rect>,
    pub row_header: Option<Rect>,
    /// Area of the virtualized flow
    pub flow: Rect,
    pub baseline_offset: f64,
    /// Band covered by the pinned rows, when any are pinned
    pub pinned_rows: Option<Rect>,
    /// Band covered by the pinned columns, when any are pinned
    pub pinned_columns: Option<Rect>,
}

/// Compute the layout plan.
///
/// Pure: the same input always yields the same plan, however often the host
/// asks for a layout.
pub fn plan_layout(input: &LayoutInput) -> LayoutPlan {
    let Rect {
        mut x,
        mut y,
        mut width,
        height,
    } = input.bounds;

    if input.show_row_header {
        x += input.vertical_header_width;
        width -= input.vertical_header_width;
    }
    let body = Rect::new(x, y, width, height);

    let mut header_height = 0.0;
    let column_header = if input.show_column_header {
        header_height = input.column_header_height;
        let area = Rect::new(x, y, width, header_height);
        y += header_height;
        Some(area)
    } else {
        None
    };

    // The gutter starts level with the column header and keeps the full height
    let row_header = input.show_row_header.then(|| {
        Rect::new(
            x - input.vertical_header_width,
            y - header_height,
            width,
            height,
        )
    });

    let flow = Rect::new(
        body.x,
        body.y + header_height,
        body.width.max(0.0),
        (body.height - header_height).max(0.0),
    );

    let pinned_rows = (input.fixed_row_height > 0.0).then(|| {
        Rect::new(
            flow.x,
            flow.y,
            flow.width,
            input.fixed_row_height.min(flow.height),
        )
    });
    let pinned_columns = (input.fixed_column_width > 0.0).then(|| {
        Rect::new(
            flow.x,
            flow.y,
            input.fixed_column_width.min(flow.width),
            flow.height,
        )
    });

    LayoutPlan {
        body,
        column_header,
        row_header,
        flow,
        baseline_offset: input.bounds.height / 2.0,
        pinned_rows,
        pinned_columns,
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

    fn input() -> LayoutInput {
        LayoutInput {
            bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
            show_row_header: true,
            show_column_header: true,
            vertical_header_width: 40.0,
            column_header_height: 24.0,
            fixed_row_height: 48.0,
            fixed_column_width: 0.0,
        }
    }

    #[test]
    fn test_both_headers() {
        let plan = plan_layout(&input());
        assert_eq!(plan.body, Rect::new(40.0, 0.0, 360.0, 300.0));
        assert_eq!(plan.column_header, Some(Rect::new(40.0, 0.0, 360.0, 24.0)));
        assert_eq!(plan.row_header, Some(Rect::new(0.0, 0.0, 360.0, 300.0)));
        assert_eq!(plan.flow, Rect::new(40.0, 24.0, 360.0, 276.0));
        assert_eq!(plan.pinned_rows, Some(Rect::new(40.0, 24.0, 360.0, 48.0)));
        assert_eq!(plan.pinned_columns, None);
        assert_eq!(plan.baseline_offset, 150.0);
    }

    #[test]
    fn test_hidden_headers() {
        let mut inp = input();
        inp.show_row_header = false;
        inp.show_column_header = false;
        let plan = plan_layout(&inp);
        assert_eq!(plan.column_header, None);
        assert_eq!(plan.row_header, None);
        assert_eq!(plan.flow, inp.bounds);
    }

    #[test]
    fn test_row_header_without_column_header() {
        let mut inp = input();
        inp.show_column_header = false;
        let plan = plan_layout(&inp);
        assert_eq!(plan.row_header, Some(Rect::new(0.0, 0.0, 360.0, 300.0)));
        assert_eq!(plan.flow, Rect::new(40.0, 0.0, 360.0, 300.0));
    }

    #[test]
    fn test_repeatable() {
        let inp = input();
        assert_eq!(plan_layout(&inp), plan_layout(&inp));
    }
}
