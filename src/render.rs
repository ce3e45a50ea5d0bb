//! Render projection: builds the per-frame view-model the host paints.
//!
//! This module reads committed entities, the viewport and the active draft
//! and produces a [`Scene`]. It never mutates application state. Live move
//! and resize previews are merged into the drawer list here, so the painter
//! only ever sees one position per drawer.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Point, Viewport};
use crate::doc::{CompartmentId, DividerId, DocStore, Drawer, DrawerId};
use crate::drag::{DragHover, DragSwap};
use crate::geom::{Rect, Segment};
use crate::hit::ResizeAnchor;
use crate::input::{InputState, Selected, SplitLine, SplitOrientation, Tool, UiState};

/// Everything the painter needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub tool: Tool,
    /// Drawers bottom-first, with live overrides applied.
    pub drawers: Vec<DrawerView>,
    pub dividers: Vec<DividerView>,
    /// Transient shapes for the active gesture.
    pub drafts: Vec<DraftShape>,
    /// Resize handles of the single selected drawer, in edit mode.
    pub resize_handles: Vec<HandleView>,
    /// Split preview under the cursor while no draft is active.
    pub split_hover: Option<Segment>,
    pub drag_hover: Option<DragHover>,
    /// The live bulk move collides with a stationary drawer.
    pub invalid_drop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawerView {
    pub id: DrawerId,
    pub rect: Rect,
    pub rotation: f64,
    pub selected: bool,
    pub compartments: Vec<CompartmentView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompartmentView {
    pub id: CompartmentId,
    /// World-space rectangle.
    pub rect: Rect,
    pub selected: bool,
    pub drop_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividerView {
    pub id: DividerId,
    pub segment: Segment,
    pub thickness: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleView {
    pub anchor: ResizeAnchor,
    pub point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftShape {
    SelectionBox { rect: Rect },
    Drawer { rect: Rect },
    Split { line: Segment },
    Divider { line: Segment },
    Resize { rect: Rect, valid: bool },
    DividerMove { line: Segment },
}

/// Project the current state into a [`Scene`].
#[must_use]
pub fn project(doc: &DocStore, viewport: Viewport, ui: &UiState, input: &InputState, drag: &DragSwap) -> Scene {
    let drag_hover = drag.hover();
    let drawers = doc
        .sorted_drawers()
        .into_iter()
        .map(|d| drawer_view(d, ui, input, drag_hover))
        .collect();

    let divider_override = match input {
        InputState::DraftDividerMove { divider_id, segment, .. } => Some((*divider_id, *segment)),
        _ => None,
    };
    let dividers = doc
        .sorted_dividers()
        .into_iter()
        .map(|d| DividerView {
            id: d.id,
            segment: match divider_override {
                Some((id, segment)) if id == d.id => segment,
                _ => d.segment(),
            },
            thickness: d.thickness,
            selected: ui.selection.divider() == Some(d.id),
        })
        .collect();

    let invalid_drop = matches!(input, InputState::MovingSelection { invalid_drop: true, .. });

    Scene {
        viewport,
        tool: ui.tool,
        drawers,
        dividers,
        drafts: draft_shapes(doc, input),
        resize_handles: resize_handles(doc, ui, input),
        split_hover: ui.split_hover.and_then(|line| split_segment(doc, &line)),
        drag_hover,
        invalid_drop,
    }
}

fn drawer_view(drawer: &Drawer, ui: &UiState, input: &InputState, hover: Option<DragHover>) -> DrawerView {
    let rect = match input {
        InputState::MovingSelection { overrides, .. } => match overrides.get(&drawer.id) {
            Some(center) => drawer.rect().with_center(*center),
            None => drawer.rect(),
        },
        InputState::DraftResize { drawer_id, rect, .. } if *drawer_id == drawer.id => *rect,
        _ => drawer.rect(),
    };
    let selected = ui.selection.drawer_ids.contains(&drawer.id) || ui.selection.single_drawer() == Some(drawer.id);
    let target = hover.filter(|h| h.target_drawer_id == drawer.id).and_then(|h| h.target_compartment_id);

    // Compartments follow the drawer center; a live resize does not rescale them.
    let compartments = drawer
        .compartments
        .iter()
        .map(|c| CompartmentView {
            id: c.id,
            rect: Rect::new(rect.x + c.x, rect.y + c.y, c.width, c.height),
            selected: matches!(ui.selection.element, Some(Selected::Compartment { id, .. }) if id == c.id),
            drop_target: target == Some(c.id),
        })
        .collect();

    DrawerView { id: drawer.id, rect, rotation: drawer.rotation, selected, compartments }
}

fn draft_shapes(doc: &DocStore, input: &InputState) -> Vec<DraftShape> {
    let shape = match input {
        InputState::SelectionBox { start, end } => DraftShape::SelectionBox { rect: Rect::from_corners(*start, *end) },
        InputState::DraftDrawer { start, end } => DraftShape::Drawer { rect: Rect::from_corners(*start, *end) },
        InputState::DraftSplit(line) => match split_segment(doc, line) {
            Some(line) => DraftShape::Split { line },
            None => return Vec::new(),
        },
        InputState::DraftDivider { start, end } => DraftShape::Divider { line: Segment::new(*start, *end) },
        InputState::DraftResize { rect, valid, .. } => DraftShape::Resize { rect: *rect, valid: *valid },
        InputState::DraftDividerMove { segment, .. } => DraftShape::DividerMove { line: *segment },
        InputState::Idle | InputState::Pressing { .. } | InputState::MovingSelection { .. } => return Vec::new(),
    };
    vec![shape]
}

fn resize_handles(doc: &DocStore, ui: &UiState, input: &InputState) -> Vec<HandleView> {
    if !ui.editable || ui.tool != Tool::Select {
        return Vec::new();
    }
    let Some(drawer) = ui.selection.single_drawer().and_then(|id| doc.drawer(&id)) else {
        return Vec::new();
    };
    if drawer.is_rotated() {
        return Vec::new();
    }
    let rect = match input {
        InputState::DraftResize { drawer_id, rect, .. } if *drawer_id == drawer.id => *rect,
        InputState::MovingSelection { .. } => return Vec::new(),
        _ => drawer.rect(),
    };
    ResizeAnchor::ALL.iter().map(|&anchor| HandleView { anchor, point: anchor.position(&rect) }).collect()
}

/// World-space segment for a split line, spanning the target compartment
/// when there is one, else the whole drawer.
#[must_use]
pub fn split_segment(doc: &DocStore, line: &SplitLine) -> Option<Segment> {
    let drawer = doc.drawer(&line.drawer_id)?;
    let bounds = line
        .compartment_id
        .and_then(|id| drawer.compartment(&id))
        .map_or_else(|| drawer.rect(), |c| drawer.compartment_world_rect(c));
    let segment = match line.orientation {
        SplitOrientation::Vertical => {
            let x = drawer.x + line.position;
            Segment::new(Point::new(x, bounds.top()), Point::new(x, bounds.bottom()))
        }
        SplitOrientation::Horizontal => {
            let y = drawer.y + line.position;
            Segment::new(Point::new(bounds.left(), y), Point::new(bounds.right(), y))
        }
    };
    Some(segment)
}
