//! Engine configuration.
//!
//! Every size the skin needs is supplied here at construction time instead of
//! being read out of host internals. All fields have defaults, so a partial
//! JSON document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ResizePolicy;

/// Default row height in pixels when the grid has no explicit height
pub const DEFAULT_CELL_HEIGHT: f64 = 24.0;

/// Default width of the row header (gutter) in pixels
pub const DEFAULT_VERTICAL_HEADER_WIDTH: f64 = 40.0;

/// Default height of the column header row in pixels
pub const DEFAULT_COLUMN_HEADER_HEIGHT: f64 = 24.0;

/// Horizontal padding added to a fitted column when the measurement cell
/// has no inset-bearing node of its own
pub const DEFAULT_CELL_PADDING: f64 = 10.0;

/// Minimum fitted width of a column holding dates (room for the picker icon)
pub const DATE_CELL_MIN_WIDTH: f64 = 105.0;

/// Default number of rows sampled when fitting a column
pub const DEFAULT_AUTOSIZE_ROWS: usize = 1000;

/// How many rows the column auto-sizer samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleLimit {
    /// Every row (expensive on large grids)
    Unlimited,
    /// At most this many leading rows
    Rows(usize),
}

impl Default for SampleLimit {
    fn default() -> Self {
        SampleLimit::Rows(DEFAULT_AUTOSIZE_ROWS)
    }
}

impl SampleLimit {
    /// Number of rows to sample out of `item_count`
    pub fn rows_for(self, item_count: usize) -> usize {
        match self {
            SampleLimit::Unlimited => item_count,
            SampleLimit::Rows(n) => item_count.min(n),
        }
    }
}

/// Skin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Row height used by grids that have no explicit height for a row
    pub default_cell_height: f64,
    /// Initial width of the row header (gutter)
    pub vertical_header_width: f64,
    /// Height of the default column header row
    pub column_header_height: f64,
    /// Fallback padding for fitted columns
    pub default_cell_padding: f64,
    /// Floor for fitted columns that contain dates
    pub date_cell_min_width: f64,
    /// Whether the row header (gutter) is shown
    pub show_row_header: bool,
    /// Whether the column header row is shown
    pub show_column_header: bool,
    /// Column resize policy of the table
    pub resize_policy: ResizePolicy,
    /// Rows sampled by `GridSkin::resize`
    pub autosize_sample_limit: SampleLimit,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_cell_height: DEFAULT_CELL_HEIGHT,
            vertical_header_width: DEFAULT_VERTICAL_HEADER_WIDTH,
            column_header_height: DEFAULT_COLUMN_HEADER_HEIGHT,
            default_cell_padding: DEFAULT_CELL_PADDING,
            date_cell_min_width: DATE_CELL_MIN_WIDTH,
            show_row_header: true,
            show_column_header: true,
            resize_policy: ResizePolicy::Unconstrained,
            autosize_sample_limit: SampleLimit::default(),
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.default_cell_height, 24.0);
        assert_eq!(config.vertical_header_width, 40.0);
        assert_eq!(config.default_cell_padding, 10.0);
        assert_eq!(config.date_cell_min_width, 105.0);
        assert_eq!(config.autosize_sample_limit, SampleLimit::Rows(1000));
    }

    #[test]
    fn test_partial_json() {
        let config = GridConfig::from_json(
            r#"{"vertical_header_width": 56, "resize_policy": "constrained", "autosize_sample_limit": "unlimited"}"#,
        )
        .unwrap();
        assert_eq!(config.vertical_header_width, 56.0);
        assert_eq!(config.resize_policy, ResizePolicy::Constrained);
        assert_eq!(config.autosize_sample_limit, SampleLimit::Unlimited);
        assert_eq!(config.default_cell_height, 24.0);
        assert!(config.show_row_header);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = GridConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Configuration:"));
    }

    #[test]
    fn test_sample_limit() {
        assert_eq!(SampleLimit::Unlimited.rows_for(12), 12);
        assert_eq!(SampleLimit::Rows(5).rows_for(12), 5);
        assert_eq!(SampleLimit::Rows(50).rows_for(12), 12);
        let limit: SampleLimit = serde_json::from_str(r#"{"rows": 3}"#).unwrap();
        assert_eq!(limit, SampleLimit::Rows(3));
    }
}
