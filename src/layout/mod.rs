//! Layout: row offsets along an axis and placement of the skin's children.
//!
//! - `AxisLayout` pre-computes prefix sums so an offset maps to a row by
//!   binary search.
//! - `plan_layout` positions the headers and the body for given bounds.

mod axis;
mod orchestrator;

pub use axis::AxisLayout;
pub use orchestrator::{plan_layout, LayoutInput, LayoutPlan};
