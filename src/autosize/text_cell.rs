//! Monospace text measurement cell.

use unicode_width::UnicodeWidthStr;

use super::{CellFactory, MeasureCell};
use crate::error::{GridError, Result};
use crate::types::{CellValue, Insets, LeafColumn};

/// Advance of one terminal column, in pixels
pub const DEFAULT_GLYPH_WIDTH: f64 = 7.0;

/// Factory for [`TextCell`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCellFactory {
    pub glyph_width: f64,
    /// Insets of the cell node; `None` falls back to the configured padding
    pub insets: Option<Insets>,
}

impl Default for TextCellFactory {
    fn default() -> Self {
        Self {
            glyph_width: DEFAULT_GLYPH_WIDTH,
            insets: None,
        }
    }
}

impl TextCellFactory {
    pub fn new(glyph_width: f64) -> Self {
        Self {
            glyph_width,
            insets: None,
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = Some(insets);
        self
    }
}

impl CellFactory for TextCellFactory {
    fn create(&self, _column: &LeafColumn) -> Option<Box<dyn MeasureCell>> {
        Some(Box::new(TextCell::new(self.glyph_width, self.insets)))
    }
}

/// Measures display text by its terminal column width.
///
/// Wide glyphs count as two columns; multi-line text measures its widest line.
#[derive(Debug, Clone, Default)]
pub struct TextCell {
    glyph_width: f64,
    insets: Option<Insets>,
    row: Option<usize>,
    item: Option<CellValue>,
    text: Option<String>,
    styled: bool,
}

impl TextCell {
    pub fn new(glyph_width: f64, insets: Option<Insets>) -> Self {
        Self {
            glyph_width,
            insets,
            ..Self::default()
        }
    }

    /// Row the cell is bound to
    pub fn row(&self) -> Option<usize> {
        self.row
    }
}

impl MeasureCell for TextCell {
    fn update_index(&mut self, _column: &LeafColumn, row: Option<usize>, item: Option<&CellValue>) {
        self.row = row;
        self.item = item.cloned();
        self.text = item.and_then(CellValue::display_text);
        self.styled = false;
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn has_graphic(&self) -> bool {
        false
    }

    fn item(&self) -> Option<&CellValue> {
        self.item.as_ref()
    }

    fn node_insets(&self) -> Option<Insets> {
        self.insets
    }

    fn process_css(&mut self) {
        self.styled = true;
    }

    fn pref_width(&self) -> Result<f64> {
        if self.row.is_none() {
            return Err(GridError::Measurement {
                row: None,
                reason: "cell is not bound to a row".into(),
            });
        }
        if !self.styled {
            return Err(GridError::Measurement {
                row: self.row,
                reason: "style pass has not run".into(),
            });
        }

        let columns = self
            .text
            .as_deref()
            .map_or(0, |text| text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0));
        let text_width = columns as f64 * self.glyph_width;
        Ok(text_width + self.insets.map_or(0.0, |i| i.horizontal()))
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

    fn measure(cell: &mut TextCell, value: &CellValue) -> Result<f64> {
        let column = LeafColumn::new(0, 80.0);
        cell.update_index(&column, Some(0), Some(value));
        cell.process_css();
        cell.pref_width()
    }

    #[test]
    fn test_ascii_width() {
        let mut cell = TextCell::new(7.0, None);
        assert_eq!(measure(&mut cell, &CellValue::from("hello")).unwrap(), 35.0);
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        let mut cell = TextCell::new(7.0, None);
        assert_eq!(measure(&mut cell, &CellValue::from("日本")).unwrap(), 28.0);
    }

    #[test]
    fn test_widest_line() {
        let mut cell = TextCell::new(10.0, None);
        assert_eq!(measure(&mut cell, &CellValue::from("ab\nabcd\nabc")).unwrap(), 40.0);
    }

    #[test]
    fn test_insets_add_to_width() {
        let mut cell = TextCell::new(10.0, Some(Insets::uniform(2.0)));
        assert_eq!(measure(&mut cell, &CellValue::from("abc")).unwrap(), 34.0);
    }

    #[test]
    fn test_unstyled_and_unbound_fail() {
        let column = LeafColumn::new(0, 80.0);
        let mut cell = TextCell::new(7.0, None);
        assert!(cell.pref_width().is_err());

        cell.update_index(&column, Some(3), Some(&CellValue::from("x")));
        let err = cell.pref_width().unwrap_err();
        assert!(matches!(err, GridError::Measurement { row: Some(3), .. }));

        cell.update_index(&column, None, None);
        assert_eq!(cell.row(), None);
        assert!(cell.text().is_none());
    }
}
