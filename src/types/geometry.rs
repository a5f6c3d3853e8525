//! Geometry primitives shared by the layout pass and the scroll logic.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in skin coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Insets of a region (padding around its content)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Same inset on every side
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Horizontal alignment of a node inside its layout area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HPos {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of a node inside its layout area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VPos {
    Top,
    #[default]
    Center,
    Bottom,
}
