//! Input model: tools, modifier keys, mouse buttons, selection, and the
//! gesture state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event.
//! `InputState` is the single active gesture tracked between
//! pointer-down and pointer-up; every draft kind is one variant, so "at most
//! one draft at a time" holds by construction. Each variant carries the
//! context needed to compute deltas from a fixed anchor and to decide on
//! release whether to commit or discard.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::collision::MinSize;
use crate::doc::{CompartmentId, DividerId, DocStore, DrawerId};
use crate::geom::{Rect, Segment};
use crate::hit::{DividerHandle, ResizeAnchor};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move and resize (default).
    #[default]
    Select,
    /// Drag anywhere to pan the camera.
    Pan,
    /// Rubber-band a new drawer.
    Drawer,
    /// Split a drawer or compartment along a line.
    Split,
    /// Draw a free divider line.
    Divider,
}

/// Modifier keys held during a wheel event; either one turns scrolling
/// into zooming.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Escape"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Direction of the line a split produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// A vertical line at a local x position.
    #[default]
    Vertical,
    /// A horizontal line at a local y position.
    Horizontal,
}

impl SplitOrientation {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// The primary selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selected {
    Drawer { id: DrawerId },
    Compartment { id: CompartmentId, drawer_id: DrawerId },
    Divider { id: DividerId },
}

/// What is selected: a primary element and/or a set of drawers.
///
/// A compartment or divider selection never coexists with a drawer set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub element: Option<Selected>,
    pub drawer_ids: BTreeSet<DrawerId>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.element = None;
        self.drawer_ids.clear();
    }

    /// Select exactly one drawer as the primary element.
    pub fn select_drawer(&mut self, id: DrawerId) {
        self.element = Some(Selected::Drawer { id });
        self.drawer_ids = BTreeSet::from([id]);
    }

    /// Select a non-drawer element (or a drawer), replacing everything.
    pub fn select_element(&mut self, element: Selected) {
        match element {
            Selected::Drawer { id } => self.select_drawer(id),
            other => {
                self.element = Some(other);
                self.drawer_ids.clear();
            }
        }
    }

    /// Select a set of drawers. One drawer becomes the primary element;
    /// several become a drawer-only selection with no primary element.
    pub fn select_drawers(&mut self, ids: BTreeSet<DrawerId>) {
        if ids.len() == 1 {
            if let Some(id) = ids.first() {
                self.select_drawer(*id);
            }
            return;
        }
        self.element = None;
        self.drawer_ids = ids;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element.is_none() && self.drawer_ids.is_empty()
    }

    /// The single selected drawer, if the selection is exactly one drawer.
    #[must_use]
    pub fn single_drawer(&self) -> Option<DrawerId> {
        match self.element {
            Some(Selected::Drawer { id }) => Some(id),
            _ => None,
        }
    }

    /// The selected divider, if any.
    #[must_use]
    pub fn divider(&self) -> Option<DividerId> {
        match self.element {
            Some(Selected::Divider { id }) => Some(id),
            _ => None,
        }
    }

    /// Drawer implied by the selection: a selected drawer or a selected
    /// compartment's parent.
    #[must_use]
    pub fn context_drawer(&self) -> Option<DrawerId> {
        match self.element {
            Some(Selected::Drawer { id }) => Some(id),
            Some(Selected::Compartment { drawer_id, .. }) => Some(drawer_id),
            _ => None,
        }
    }

    /// Forget ids that no longer exist in `doc`. Returns `true` if anything
    /// was dropped.
    pub fn retain_existing(&mut self, doc: &DocStore) -> bool {
        let before = self.drawer_ids.len();
        self.drawer_ids.retain(|id| doc.contains_drawer(id));
        let keep = match self.element {
            Some(Selected::Drawer { id }) => doc.contains_drawer(&id),
            Some(Selected::Compartment { id, drawer_id }) => {
                doc.compartment(&id).is_some_and(|(drawer, _)| drawer.id == drawer_id)
            }
            Some(Selected::Divider { id }) => doc.contains_divider(&id),
            None => true,
        };
        if !keep {
            self.element = None;
        }
        !keep || self.drawer_ids.len() != before
    }
}

/// A pending split line inside a drawer, in the drawer's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitLine {
    pub drawer_id: DrawerId,
    pub compartment_id: Option<CompartmentId>,
    pub orientation: SplitOrientation,
    /// Local x (vertical) or y (horizontal) offset from the drawer center.
    pub position: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    pub selection: Selection,
    /// Whether edit-mode gestures (resize, move, compartment drag) are allowed.
    pub editable: bool,
    /// Orientation used by the next split hover/draft.
    pub split_orientation: SplitOrientation,
    /// Split tool preview under the cursor while no draft is active.
    pub split_hover: Option<SplitLine>,
    /// Drawer under the cursor, tracked for split targeting.
    pub hover_drawer: Option<DrawerId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::Select,
            selection: Selection::default(),
            editable: true,
            split_orientation: SplitOrientation::Vertical,
            split_hover: None,
            hover_drawer: None,
        }
    }
}

/// What a press resolves to if released without dragging past the pan threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Do nothing (right-button pan, pan tool).
    Nothing,
    /// Clear the selection.
    ClearSelection,
    /// Select this element.
    Select(Selected),
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A press that pans once it travels past the threshold and otherwise
    /// resolves to `click` on release.
    Pressing {
        /// Screen-space position at pointer-down.
        origin_screen: Point,
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
        /// Whether the threshold has been exceeded.
        panning: bool,
        click: ClickAction,
    },
    /// Rubber-band drawer creation.
    DraftDrawer {
        /// Snapped corner where the drag started.
        start: Point,
        /// Raw world position of the pointer.
        end: Point,
    },
    /// A split line being placed inside a drawer.
    DraftSplit(SplitLine),
    /// A free divider being drawn between snapped points.
    DraftDivider { start: Point, end: Point },
    /// A drawer edge or corner being dragged.
    DraftResize {
        drawer_id: DrawerId,
        anchor: ResizeAnchor,
        /// Drawer rectangle at pointer-down.
        start_rect: Rect,
        /// World-space pointer position at pointer-down; deltas are measured from here.
        start_world: Point,
        /// Candidate rectangle from the latest move.
        rect: Rect,
        min: MinSize,
        /// Result of the latest validity check.
        valid: bool,
    },
    /// A selected divider's endpoint or whole line being dragged.
    DraftDividerMove {
        divider_id: DividerId,
        handle: DividerHandle,
        start_world: Point,
        /// Segment at pointer-down.
        original: Segment,
        /// Segment from the latest move.
        segment: Segment,
    },
    /// Marquee selection.
    SelectionBox { start: Point, end: Point },
    /// Bulk drag of the selected drawers.
    MovingSelection {
        start_world: Point,
        /// Committed center of every moving drawer at pointer-down.
        origins: Vec<(DrawerId, Point)>,
        /// Live positions for rendering.
        overrides: HashMap<DrawerId, Point>,
        /// Whether the live positions collide with a stationary drawer.
        invalid_drop: bool,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressing { .. } => "pressing",
            Self::DraftDrawer { .. } => "draft_drawer",
            Self::DraftSplit(_) => "draft_split",
            Self::DraftDivider { .. } => "draft_divider",
            Self::DraftResize { .. } => "draft_resize",
            Self::DraftDividerMove { .. } => "draft_divider_move",
            Self::SelectionBox { .. } => "selection_box",
            Self::MovingSelection { .. } => "moving_selection",
        }
    }
}
