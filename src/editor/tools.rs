use bevy::window::{CursorIcon, SystemCursorIcon};
use serde::{Deserialize, Serialize};

use super::mode::EditingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorTool {
    Select,
    Edit,
    #[default]
    Hand,
    Rectangle,
    Circle,
    Ellipse,
    Polygon,
    PolygonByDragging,
    Pencil,
    Line,
    Marker,
    TypedMarker,
}

impl EditorTool {
    #[allow(dead_code)]
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Select => "Select (V)",
            EditorTool::Edit => "Edit (E)",
            EditorTool::Hand => "Hand (H)",
            EditorTool::Rectangle => "Rectangle (R)",
            EditorTool::Circle => "Circle (O)",
            EditorTool::Ellipse => "Ellipse (Shift+O)",
            EditorTool::Polygon => "Polygon (G)",
            EditorTool::PolygonByDragging => "Lasso Polygon (D)",
            EditorTool::Pencil => "Pencil (P)",
            EditorTool::Line => "Line (L)",
            EditorTool::Marker => "Marker (M)",
            EditorTool::TypedMarker => "Typed Marker",
        }
    }

    /// Capability this tool applies to pointer input, before the selection guard.
    pub fn editing_mode(&self) -> EditingMode {
        match self {
            EditorTool::Select => EditingMode::Transform,
            EditorTool::Edit => EditingMode::Modify,
            EditorTool::Hand => EditingMode::View,
            EditorTool::Rectangle => EditingMode::DrawRectangle,
            EditorTool::Circle => EditingMode::DrawCircleByDiameter,
            EditorTool::Ellipse => EditingMode::DrawEllipseByBoundingBox,
            EditorTool::Polygon => EditingMode::DrawPolygon,
            EditorTool::PolygonByDragging => EditingMode::DrawPolygonByDragging,
            EditorTool::Pencil => EditingMode::DrawLineStringByDragging,
            EditorTool::Line => EditingMode::DrawLineString,
            EditorTool::Marker | EditorTool::TypedMarker => EditingMode::DrawPoint,
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            EditorTool::Select | EditorTool::Edit => CursorIcon::System(SystemCursorIcon::Default),
            EditorTool::Hand => CursorIcon::System(SystemCursorIcon::Grab),
            _ => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    #[allow(dead_code)]
    pub fn all() -> &'static [EditorTool] {
        &[
            EditorTool::Select,
            EditorTool::Edit,
            EditorTool::Hand,
            EditorTool::Rectangle,
            EditorTool::Circle,
            EditorTool::Ellipse,
            EditorTool::Polygon,
            EditorTool::PolygonByDragging,
            EditorTool::Pencil,
            EditorTool::Line,
            EditorTool::Marker,
            EditorTool::TypedMarker,
        ]
    }

    #[allow(dead_code)]
    pub fn is_drawing_tool(&self) -> bool {
        self.editing_mode().is_drawing()
    }
}
