//! Data types shared across the engine.

mod cell;
mod column;
mod geometry;
mod scrollbar;
mod selection;

pub use cell::*;
pub use column::*;
pub use geometry::*;
pub use scrollbar::*;
pub use selection::*;
