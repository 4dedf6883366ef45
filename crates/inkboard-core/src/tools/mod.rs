//! Tool selection and the style settings consumed by gestures.

use crate::background::BackgroundKind;
use crate::shapes::ShapeKind;
use crate::style::{FontFamily, SerializableColor};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Hand,
    Select,
    Shape,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Hand => "Hand",
            ToolKind::Select => "Select",
            ToolKind::Shape => "Shape",
        }
    }
}

/// Tool and style state owned by the surrounding settings UI.
///
/// Sizes are in device pixels at 100% zoom; the eraser radius is converted to world
/// units at the current zoom so its on-screen footprint stays constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub pen_size: f64,
    pub pen_color: SerializableColor,
    /// Eraser radius.
    pub eraser_size: f64,
    pub shape_size: f64,
    pub shape_color: SerializableColor,
    pub shape_kind: ShapeKind,
    pub background: BackgroundKind,
    pub background_color: SerializableColor,
    pub font_family: FontFamily,
    pub font_size: f64,
    /// Snap dragged and recognized text onto rule lines.
    pub ruled_snap: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            pen_size: 3.0,
            pen_color: SerializableColor::black(),
            eraser_size: 10.0,
            shape_size: 3.0,
            shape_color: SerializableColor::black(),
            shape_kind: ShapeKind::default(),
            background: BackgroundKind::default(),
            background_color: SerializableColor::new(200, 200, 200, 255),
            font_family: FontFamily::default(),
            font_size: 24.0,
            ruled_snap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let json = r#"{ "tool": "Eraser", "eraser_size": 25.0 }"#;
        let settings: ToolSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tool, ToolKind::Eraser);
        assert!((settings.eraser_size - 25.0).abs() < f64::EPSILON);
        assert!((settings.pen_size - ToolSettings::default().pen_size).abs() < f64::EPSILON);
    }
}
