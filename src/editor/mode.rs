//! Editing mode resolution and tool-derived interaction flags.

use bevy::prelude::Resource;

use super::tools::EditorTool;

/// How pointer input is interpreted while a tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditingMode {
    /// Inert: pointer input only pans and zooms the map
    View,
    Transform,
    Rotate,
    Scale,
    Modify,
    DrawPoint,
    DrawLineString,
    DrawLineStringByDragging,
    DrawPolygon,
    DrawPolygonByDragging,
    DrawRectangle,
    DrawCircleByDiameter,
    DrawEllipseByBoundingBox,
}

impl EditingMode {
    /// Modes that manipulate the selected features and have nothing to act on
    /// without a selection.
    pub fn requires_selection(&self) -> bool {
        matches!(
            self,
            EditingMode::Transform | EditingMode::Rotate | EditingMode::Scale
        )
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            EditingMode::DrawPoint
                | EditingMode::DrawLineString
                | EditingMode::DrawLineStringByDragging
                | EditingMode::DrawPolygon
                | EditingMode::DrawPolygonByDragging
                | EditingMode::DrawRectangle
                | EditingMode::DrawCircleByDiameter
                | EditingMode::DrawEllipseByBoundingBox
        )
    }
}

/// Resolve the mode for `tool`, falling back to [`EditingMode::View`] when the
/// mode needs a target and `selection` is empty.
pub fn resolve_mode(tool: EditorTool, selection: &[usize]) -> EditingMode {
    let mode = tool.editing_mode();
    if selection.is_empty() && mode.requires_selection() {
        EditingMode::View
    } else {
        mode
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSelectShape {
    Rectangle,
    Polygon,
}

/// Whether an empty-area drag should start a box selection, and with which shape.
///
/// Box selection only starts from an empty selection; otherwise dragging moves
/// the selected features.
#[allow(dead_code)]
pub fn box_select(
    tool: EditorTool,
    selection: &[usize],
    map_draggable: bool,
) -> Option<BoxSelectShape> {
    if !selection.is_empty() || map_draggable {
        return None;
    }
    match tool {
        EditorTool::Select => Some(BoxSelectShape::Rectangle),
        EditorTool::Edit => Some(BoxSelectShape::Polygon),
        _ => None,
    }
}

/// Map interaction switches consumed by the renderer and gesture layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionFlags {
    /// Features respond to hover and click
    pub pickable: bool,
    /// Dragging pans the map
    pub map_draggable: bool,
    pub double_click_zoom: bool,
}

impl InteractionFlags {
    /// Holding space pans temporarily regardless of tool.
    pub fn for_tool(tool: EditorTool, space_held: bool) -> Self {
        let panning = tool == EditorTool::Hand || space_held;
        Self {
            pickable: !panning,
            map_draggable: panning,
            double_click_zoom: tool == EditorTool::Hand,
        }
    }
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self::for_tool(EditorTool::default(), false)
    }
}
