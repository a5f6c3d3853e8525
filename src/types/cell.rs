use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value held by a grid cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

/// Kind of a cell value, without its payload
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    #[serde(rename = "s")]
    String,
    #[serde(rename = "n")]
    Number,
    #[serde(rename = "b")]
    Boolean,
    #[serde(rename = "d")]
    Date,
    #[serde(rename = "z")]
    Empty,
}

impl CellValue {
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Empty => CellType::Empty,
            CellValue::Text(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Bool(_) => CellType::Boolean,
            CellValue::Date(_) => CellType::Date,
        }
    }

    /// True for date-typed values (they get an inline picker affordance)
    pub fn is_date(&self) -> bool {
        matches!(self, CellValue::Date(_))
    }

    /// Plain display text, `None` for empty cells.
    ///
    /// Integral numbers drop their fractional part, dates use ISO 8601.
    pub fn display_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) if n.is_finite() && n.fract().abs() < f64::EPSILON => {
                Some(format!("{n:.0}"))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}
