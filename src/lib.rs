//! gridview - pinned-region windowing engine for very large grids
//!
//! Keeps the leading rows and columns frozen while the rest of the grid
//! scrolls underneath:
//! - Cached aggregate size of the pinned rows and columns
//! - Vertical overlay that keeps pinned rows at constant screen offsets
//! - Horizontal alignment that never leaves a column under the pinned band
//! - Focus navigation that pulls rows out from behind the pinned band
//! - Column auto-sizing from sampled content
//! - Layout of the column header, row header (gutter) and body
//!
//! # Usage
//!
//! ```
//! use gridview::{Columns, GridConfig, GridFlow, GridModel, GridSkin, Rect};
//!
//! # fn main() -> gridview::Result<()> {
//! let grid = GridModel::blank(1_000, 10, 24.0);
//! let mut skin = GridSkin::new(
//!     GridConfig::default(),
//!     grid,
//!     Columns::uniform(10, 80.0),
//!     GridFlow::new(0.0, 0.0),
//! );
//! skin.set_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
//! skin.set_fixed_rows([0, 1])?;
//! assert!((skin.fixed_row_height() - 48.0).abs() < f64::EPSILON);
//! # Ok(())
//! # }
//! ```

pub mod autosize;
pub mod config;
pub mod error;
pub mod fixed;
pub mod flow;
pub mod focus;
pub mod grid;
pub mod header;
pub mod layout;
pub mod scroll;
pub mod skin;
pub mod types;

pub use autosize::{CellFactory, FitResult, MeasureCell, TextCellFactory};
pub use config::{GridConfig, SampleLimit};
pub use error::{GridError, Result};
pub use fixed::FixedRegionTracker;
pub use flow::{GridFlow, GridRow, PinnedRegion, RowView, VirtualFlow};
pub use focus::{FocusModel, FocusedCell};
pub use grid::{Grid, GridModel};
pub use header::{ColumnHeader, HeaderNode, RowHeaderView, VerticalHeader};
pub use layout::LayoutPlan;
pub use skin::{GridEvent, GridSkin, SkinSnapshot};

pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
