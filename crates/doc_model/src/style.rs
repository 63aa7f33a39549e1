//! Element styling
//!
//! Only the properties the editing core reads or writes are modelled. Lengths
//! are CSS pixels.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment inside a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// How an element participates in flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Auto,
    Block,
    InlineBlock,
    InlineTable,
    Table,
}

/// Text wrapping around an inline object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
}

/// Uniform border on all four sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    pub width: f32,
    pub color: String,
}

impl Border {
    /// A border of the given width; a zero width means no border at all.
    pub fn new(width: f32, color: impl Into<String>) -> Self {
        Self {
            style: if width <= 0.0 { BorderStyle::None } else { BorderStyle::Solid },
            width,
            color: color.into(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width > 0.0
    }
}

/// Per-corner rounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Margins around a box. `None` on a side means `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

impl Margins {
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::zero()
    }
}

/// Style attached to any element node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Explicit width; `None` lets the host size the element
    pub width: Option<f32>,
    pub display: Display,
    pub float: Float,
    pub margins: Margins,
    /// Extra left offset used for paragraph indentation
    pub indent: f32,
    pub padding: Option<(f32, f32)>,
    pub min_width: Option<f32>,
    pub border: Option<Border>,
    pub radius: CornerRadii,
    /// Clip children to the rounded corners
    pub clip: bool,
    pub text_align: Option<Alignment>,
    pub color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
}

impl ElementStyle {
    /// True when no font or color override is set
    pub fn has_no_text_overrides(&self) -> bool {
        self.color.is_none() && self.font_family.is_none() && self.font_size.is_none()
    }

    pub fn clear_text_overrides(&mut self) {
        self.color = None;
        self.font_family = None;
        self.font_size = None;
    }
}
