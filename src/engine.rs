//! Interaction engine: routes raw input through the gesture state machine and
//! turns finished gestures into [`Action`]s for the host.
//!
//! A pointer-down picks exactly one branch of the precedence ladder and stores
//! it as the active [`InputState`]; moves advance only that branch; the
//! matching pointer-up commits or discards it and returns to idle. Committed
//! entities are never touched here: every edit leaves as an intent and comes
//! back, if accepted, through the next [`EngineCore::load_snapshot`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::camera::{Point, Viewport};
use crate::collision::{bulk_move_collision, min_resize_size, overlaps, resize_is_valid};
use crate::config::EditorConfig;
use crate::consts::MARQUEE_CLICK_FRACTION;
use crate::doc::{Compartment, CompartmentId, DividerId, Divider, DocStore, Drawer, DrawerId};
use crate::drag::{DragSwap, DropIntent};
use crate::error::SnapshotError;
use crate::geom::{Rect, Segment};
use crate::grid::{snap, snap_center_to_grid_edges, snap_point};
use crate::hit::{
    DividerHandle, ResizeAnchor, compartment_at, compartment_containing, divider_at, divider_handle_at, drawer_at,
    resize_handle_at,
};
use crate::input::{
    Button, ClickAction, InputState, Key, Modifiers, Selected, Selection, SplitLine, SplitOrientation, Tool, UiState,
    WheelDelta,
};
use crate::render::{self, Scene};
use crate::viewport::{ViewportController, ZoomOptions};

/// New center for one drawer in a batched move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawerPosition {
    pub drawer_id: DrawerId,
    pub x: f64,
    pub y: f64,
}

/// Actions returned from input handlers for the host to process.
///
/// Mutation intents are fire-and-forget: the engine never waits for their
/// result and only learns the outcome from the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    CreateDrawer {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    SplitDrawer {
        drawer_id: DrawerId,
        orientation: SplitOrientation,
        /// Local offset from the drawer center along the split axis.
        position: f64,
        target_compartment_id: Option<CompartmentId>,
    },
    UpdateDrawerPositions(Vec<DrawerPosition>),
    ResizeDrawer {
        drawer_id: DrawerId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    CreateDivider {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    UpdateDivider {
        divider_id: DividerId,
        segment: Segment,
    },
    SwapCompartments {
        a: CompartmentId,
        b: CompartmentId,
    },
    MoveCompartmentToDrawer {
        compartment_id: CompartmentId,
        drawer_id: DrawerId,
        /// Position relative to the target drawer center.
        x: f64,
        y: f64,
    },
    /// Return the dragged compartment shape to its committed position.
    ResetCompartmentShape { id: CompartmentId },
    SetCursor(String),
    /// Call [`EngineCore::on_animation_frame`] on the next animation frame.
    RequestFrame,
    RenderNeeded,
}

/// Core engine state. Holds no rendering surface, so everything here is
/// testable without a host.
pub struct EngineCore {
    pub doc: DocStore,
    pub config: EditorConfig,
    pub view: ViewportController,
    pub ui: UiState,
    pub input: InputState,
    pub drag: DragSwap,
    /// Screen position of the most recent pointer event.
    last_pointer: Option<Point>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            doc: DocStore::new(),
            view: ViewportController::new(&config),
            config,
            ui: UiState::default(),
            input: InputState::default(),
            drag: DragSwap::new(),
            last_pointer: None,
        }
    }

    // --- Data inputs ---

    /// Replace the committed entities with a fresh snapshot from the host.
    ///
    /// Any draft, selection entry or compartment drag that refers to a
    /// vanished entity is dropped.
    pub fn load_snapshot(&mut self, drawers: Vec<Drawer>, dividers: Vec<Divider>) -> Vec<Action> {
        self.doc.load_snapshot(drawers, dividers);
        self.reconcile()
    }

    /// Like [`EngineCore::load_snapshot`], but rejects structurally unsound
    /// snapshots and keeps the previous document in that case.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] describing the first problem found.
    pub fn try_load_snapshot(&mut self, drawers: Vec<Drawer>, dividers: Vec<Divider>) -> Result<Vec<Action>, SnapshotError> {
        self.doc.try_load(drawers, dividers)?;
        Ok(self.reconcile())
    }

    // --- Tool / mode ---

    /// Switch tools. Any gesture in progress is discarded.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.input.is_active() {
            debug!(state = self.input.name(), ?tool, "tool switch: draft discarded");
        }
        self.input = InputState::Idle;
        self.ui.tool = tool;
        self.ui.split_hover = None;
        self.ui.hover_drawer = None;
        vec![Action::SetCursor(self.tool_cursor().into()), Action::RenderNeeded]
    }

    /// Enable or disable edit-mode gestures. Disabling cancels any resize,
    /// bulk move or compartment drag in progress.
    pub fn set_editable(&mut self, editable: bool) -> Vec<Action> {
        self.ui.editable = editable;
        let mut actions = Vec::new();
        if !editable {
            if matches!(self.input, InputState::DraftResize { .. } | InputState::MovingSelection { .. }) {
                debug!(state = self.input.name(), "edit mode disabled: draft discarded");
                self.input = InputState::Idle;
            }
            self.cancel_drag(&mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Selection ---

    pub fn select_compartment(&mut self, id: CompartmentId) -> Vec<Action> {
        let Some((drawer, _)) = self.doc.compartment(&id) else {
            warn!(%id, "select_compartment: unknown compartment");
            return Vec::new();
        };
        let drawer_id = drawer.id;
        self.ui.selection.select_element(Selected::Compartment { id, drawer_id });
        vec![Action::RenderNeeded]
    }

    pub fn select_divider(&mut self, id: DividerId) -> Vec<Action> {
        if !self.doc.contains_divider(&id) {
            warn!(%id, "select_divider: unknown divider");
            return Vec::new();
        }
        self.ui.selection.select_element(Selected::Divider { id });
        vec![Action::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.ui.selection.clear();
        vec![Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Record the container size. A change resets the view and fits it to
    /// the drawers.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        if !self.view.set_size(width, height) {
            return Vec::new();
        }
        self.view.zoom_to_fit(self.doc.drawer_bounds());
        vec![Action::RenderNeeded]
    }

    pub fn zoom_to_fit(&mut self) -> Vec<Action> {
        self.view.zoom_to_fit(self.doc.drawer_bounds());
        vec![Action::RenderNeeded]
    }

    pub fn zoom_to_location(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
        options: ZoomOptions,
    ) -> Vec<Action> {
        if self.view.zoom_to_location(x, y, width, height, options) {
            vec![Action::RequestFrame]
        } else {
            vec![Action::RenderNeeded]
        }
    }

    /// Drain the coalesced pan and drag mailboxes and advance any viewport
    /// animation. Called by the host once per requested frame.
    pub fn on_animation_frame(&mut self, now_ms: f64) -> Vec<Action> {
        let mut changed = self.view.flush_pan();
        changed |= self.drag.flush(&self.doc);
        let mut more = false;
        if self.view.is_animating() {
            more = self.view.tick(now_ms);
            changed = true;
        }
        let mut actions = Vec::new();
        if more {
            actions.push(Action::RequestFrame);
        }
        if changed {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if self.input.is_active() {
            debug!(state = self.input.name(), "pointer down: unfinished gesture discarded");
        }
        self.last_pointer = Some(screen_pt);
        let world = self.view.screen_to_world(screen_pt);
        self.input = self.begin_gesture(screen_pt, world, button);
        if matches!(self.input, InputState::DraftSplit(_)) {
            self.ui.split_hover = None;
        }

        let mut actions = Vec::new();
        if let Some(cursor) = self.gesture_cursor() {
            actions.push(Action::SetCursor(cursor.into()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.last_pointer = Some(screen_pt);
        let world = self.view.screen_to_world(screen_pt);
        let grid = self.config.grid_size;
        if !self.input.is_active() {
            return self.update_split_hover(world);
        }

        match &mut self.input {
            InputState::Idle => {}
            InputState::Pressing { origin_screen, last_screen, panning, .. } => {
                let mut actions = Vec::new();
                if !*panning {
                    if origin_screen.distance(screen_pt) <= self.config.pan_threshold_px {
                        return actions;
                    }
                    *panning = true;
                    actions.push(Action::SetCursor("grabbing".into()));
                }
                let delta = screen_pt.sub(*last_screen);
                *last_screen = screen_pt;
                if self.view.pan(delta.x, delta.y) {
                    actions.push(Action::RequestFrame);
                }
                return actions;
            }
            InputState::DraftDrawer { end, .. } | InputState::SelectionBox { end, .. } => {
                *end = world;
            }
            InputState::DraftDivider { end, .. } => {
                *end = snap_point(world, grid);
            }
            InputState::DraftSplit(line) => {
                if let Some(drawer) = self.doc.drawer(&line.drawer_id) {
                    let target = line.compartment_id.and_then(|id| drawer.compartment(&id));
                    if let Some(position) = split_position(drawer, target, world, line.orientation, grid) {
                        line.position = position;
                    }
                }
            }
            InputState::DraftResize { drawer_id, anchor, start_rect, start_world, rect, min, valid } => {
                let candidate = resize_candidate(start_rect, *anchor, world.sub(*start_world), grid);
                let others: Vec<&Drawer> = self.doc.drawers().filter(|d| d.id != *drawer_id).collect();
                *valid = resize_is_valid(&candidate, &others, *min);
                *rect = candidate;
            }
            InputState::DraftDividerMove { handle, start_world, original, segment, .. } => {
                *segment = match handle {
                    DividerHandle::Start => Segment::new(snap_point(world, grid), original.end()),
                    DividerHandle::End => Segment::new(original.start(), snap_point(world, grid)),
                    DividerHandle::Line => original.translate(snap_point(world.sub(*start_world), grid)),
                };
            }
            InputState::MovingSelection { start_world, origins, overrides, invalid_drop } => {
                let delta = snap_point(world.sub(*start_world), grid);
                overrides.clear();
                *invalid_drop = false;
                if delta.x.abs() > f64::EPSILON || delta.y.abs() > f64::EPSILON {
                    for (id, origin) in origins.iter() {
                        let Some(drawer) = self.doc.drawer(id) else {
                            continue;
                        };
                        let x = snap_center_to_grid_edges(origin.x + delta.x, drawer.width, grid);
                        let y = snap_center_to_grid_edges(origin.y + delta.y, drawer.height, grid);
                        overrides.insert(*id, Point::new(x, y));
                    }
                    let moving: BTreeSet<DrawerId> = origins.iter().map(|(id, _)| *id).collect();
                    let all: Vec<&Drawer> = self.doc.drawers().collect();
                    *invalid_drop = bulk_move_collision(&moving, overrides, &all);
                }
            }
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button) -> Vec<Action> {
        self.last_pointer = Some(screen_pt);
        let state = std::mem::take(&mut self.input);
        if !state.is_active() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        match state {
            InputState::Idle => {}
            InputState::Pressing { panning, click, .. } => {
                if !panning {
                    self.apply_click(click);
                }
            }
            InputState::DraftDrawer { start, end } => {
                if let Some(action) = self.commit_drawer(start, end) {
                    actions.push(action);
                }
            }
            InputState::DraftSplit(line) => {
                debug!(drawer_id = %line.drawer_id, position = line.position, "split committed");
                actions.push(Action::SplitDrawer {
                    drawer_id: line.drawer_id,
                    orientation: line.orientation,
                    position: line.position,
                    target_compartment_id: line.compartment_id,
                });
            }
            InputState::DraftDivider { start, end } => {
                let segment = Segment::new(start, end);
                if segment.length() > f64::EPSILON {
                    debug!(length = segment.length(), "divider committed");
                    actions.push(Action::CreateDivider { x1: segment.x1, y1: segment.y1, x2: segment.x2, y2: segment.y2 });
                } else {
                    debug!("divider discarded: zero length");
                }
            }
            InputState::DraftResize { drawer_id, start_rect, rect, valid, .. } => {
                if !valid {
                    debug!(%drawer_id, "resize discarded: invalid size or overlap");
                } else if rect == start_rect {
                    debug!(%drawer_id, "resize discarded: unchanged");
                } else {
                    debug!(%drawer_id, width = rect.width, height = rect.height, "resize committed");
                    actions.push(Action::ResizeDrawer {
                        drawer_id,
                        x: rect.x,
                        y: rect.y,
                        width: rect.width,
                        height: rect.height,
                    });
                }
            }
            InputState::DraftDividerMove { divider_id, original, segment, .. } => {
                if segment == original {
                    debug!(%divider_id, "divider move discarded: unchanged");
                } else {
                    debug!(%divider_id, "divider move committed");
                    actions.push(Action::UpdateDivider { divider_id, segment });
                }
            }
            InputState::SelectionBox { start, end } => self.finish_marquee(start, end),
            InputState::MovingSelection { origins, overrides, invalid_drop, .. } => {
                let moved = origins.iter().any(|(id, origin)| overrides.get(id).is_some_and(|p| p != origin));
                if !moved {
                    debug!("move discarded: zero delta");
                } else if invalid_drop {
                    debug!(count = origins.len(), "move discarded: collision");
                } else {
                    let positions: Vec<DrawerPosition> = origins
                        .iter()
                        .filter_map(|(id, _)| overrides.get(id).map(|p| DrawerPosition { drawer_id: *id, x: p.x, y: p.y }))
                        .collect();
                    debug!(count = positions.len(), "move committed");
                    actions.push(Action::UpdateDrawerPositions(positions));
                }
            }
        }
        actions.push(Action::SetCursor(self.tool_cursor().into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta {
            let step = self.config.wheel_zoom_factor;
            let factor = if delta.dy < 0.0 {
                step
            } else if delta.dy > 0.0 {
                1.0 / step
            } else {
                return Vec::new();
            };
            self.view.zoom(factor, screen_pt);
            return vec![Action::RenderNeeded];
        }
        if self.view.pan(-delta.dx, -delta.dy) {
            vec![Action::RequestFrame]
        } else {
            Vec::new()
        }
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => self.cancel_interaction(),
            "r" | "R" => self.toggle_split_orientation(),
            _ => Vec::new(),
        }
    }

    // --- Compartment drag ---

    pub fn on_compartment_drag_start(&mut self, compartment_id: CompartmentId) -> Vec<Action> {
        if !self.ui.editable {
            debug!(%compartment_id, "compartment drag ignored: not editable");
            return Vec::new();
        }
        if !self.drag.start(&self.doc, compartment_id) {
            warn!(%compartment_id, "compartment drag for unknown compartment");
            return Vec::new();
        }
        vec![Action::SetCursor("grabbing".into()), Action::RenderNeeded]
    }

    pub fn on_compartment_drag_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.view.screen_to_world(screen_pt);
        if self.drag.post_move(world) {
            vec![Action::RequestFrame]
        } else {
            Vec::new()
        }
    }

    pub fn on_compartment_drag_end(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(state) = self.drag.state() else {
            return Vec::new();
        };
        let world = self.view.screen_to_world(screen_pt);
        let mut actions = vec![Action::ResetCompartmentShape { id: state.compartment_id }];
        match self.drag.end(&self.doc, world, self.config.grid_size) {
            Some(DropIntent::Swap { a, b }) => actions.push(Action::SwapCompartments { a, b }),
            Some(DropIntent::MoveToDrawer { compartment_id, drawer_id, x, y }) => {
                actions.push(Action::MoveCompartmentToDrawer { compartment_id, drawer_id, x, y });
            }
            None => {}
        }
        actions.push(Action::SetCursor(self.tool_cursor().into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.view.viewport()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.ui.selection
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// The render view-model for the current frame.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render::project(&self.doc, self.view.viewport(), &self.ui, &self.input, &self.drag)
    }

    // --- Gesture start ---

    fn begin_gesture(&mut self, screen: Point, world: Point, button: Button) -> InputState {
        if button != Button::Primary {
            return pressing(screen, ClickAction::Nothing);
        }
        let grid = self.config.grid_size;
        match self.ui.tool {
            Tool::Drawer if self.is_empty_canvas(world) => {
                InputState::DraftDrawer { start: snap_point(world, grid), end: world }
            }
            Tool::Divider if self.is_empty_canvas(world) => {
                let start = snap_point(world, grid);
                InputState::DraftDivider { start, end: start }
            }
            Tool::Split => match self.split_target(world) {
                Some(line) => InputState::DraftSplit(line),
                None => pressing(screen, ClickAction::ClearSelection),
            },
            Tool::Pan => pressing(screen, ClickAction::Nothing),
            Tool::Select => self.begin_select_gesture(screen, world),
            Tool::Drawer | Tool::Divider => pressing(screen, ClickAction::ClearSelection),
        }
    }

    fn begin_select_gesture(&mut self, screen: Point, world: Point) -> InputState {
        let slop = self.handle_slop();
        if self.ui.editable {
            if let Some(state) = self.begin_resize(world, slop) {
                return state;
            }
        }
        if let Some(state) = self.begin_divider_move(world, slop) {
            return state;
        }
        if let Some(divider) = divider_at(&self.doc, world, slop) {
            return pressing(screen, ClickAction::Select(Selected::Divider { id: divider.id }));
        }

        let hit = drawer_at(&self.doc, world).map(|d| (d.id, compartment_containing(d, world).map(|c| c.id)));
        match hit {
            None => InputState::SelectionBox { start: world, end: world },
            Some((drawer_id, _)) if self.ui.editable => self.begin_move(drawer_id, world),
            Some((drawer_id, Some(id))) => pressing(screen, ClickAction::Select(Selected::Compartment { id, drawer_id })),
            Some((drawer_id, None)) => pressing(screen, ClickAction::Select(Selected::Drawer { id: drawer_id })),
        }
    }

    fn begin_resize(&self, world: Point, slop: f64) -> Option<InputState> {
        let drawer = self.doc.drawer(&self.ui.selection.single_drawer()?)?;
        if drawer.is_rotated() {
            return None;
        }
        let rect = drawer.rect();
        let anchor = resize_handle_at(&rect, world, slop)?;
        Some(InputState::DraftResize {
            drawer_id: drawer.id,
            anchor,
            start_rect: rect,
            start_world: world,
            rect,
            min: min_resize_size(drawer, self.config.grid_size),
            valid: true,
        })
    }

    fn begin_divider_move(&self, world: Point, slop: f64) -> Option<InputState> {
        let divider = self.doc.divider(&self.ui.selection.divider()?)?;
        let handle = divider_handle_at(divider, world, slop)?;
        let segment = divider.segment();
        Some(InputState::DraftDividerMove {
            divider_id: divider.id,
            handle,
            start_world: world,
            original: segment,
            segment,
        })
    }

    fn begin_move(&mut self, drawer_id: DrawerId, world: Point) -> InputState {
        if !self.ui.selection.drawer_ids.contains(&drawer_id) {
            self.ui.selection.select_drawer(drawer_id);
        }
        let origins = self
            .ui
            .selection
            .drawer_ids
            .iter()
            .filter_map(|id| self.doc.drawer(id))
            .map(|d| (d.id, Point::new(d.x, d.y)))
            .collect();
        InputState::MovingSelection { start_world: world, origins, overrides: HashMap::new(), invalid_drop: false }
    }

    /// Split target: hovered drawer, else the selection's drawer, else the
    /// drawer under the pointer.
    fn split_target(&self, world: Point) -> Option<SplitLine> {
        let drawer_id = self
            .ui
            .hover_drawer
            .or_else(|| self.ui.selection.context_drawer())
            .or_else(|| drawer_at(&self.doc, world).map(|d| d.id))?;
        let drawer = self.doc.drawer(&drawer_id)?;
        if drawer.is_rotated() {
            debug!(%drawer_id, "split ignored: rotated drawer");
            return None;
        }
        let line = split_line(drawer, world, self.ui.split_orientation, self.config.grid_size);
        if line.is_none() {
            debug!(%drawer_id, "split ignored: no room for a line");
        }
        line
    }

    // --- Gesture end ---

    fn commit_drawer(&self, start: Point, end: Point) -> Option<Action> {
        let grid = self.config.grid_size;
        let raw_w = (end.x - start.x).abs();
        let raw_h = (end.y - start.y).abs();
        if raw_w < grid || raw_h < grid {
            debug!(width = raw_w, height = raw_h, "drawer discarded: below one grid cell");
            return None;
        }
        let width = snap(raw_w, grid).max(grid);
        let height = snap(raw_h, grid).max(grid);
        let left = snap(start.x.min(end.x), grid);
        let top = snap(start.y.min(end.y), grid);
        debug!(width, height, "drawer committed");
        Some(Action::CreateDrawer { x: left + width / 2.0, y: top + height / 2.0, width, height })
    }

    fn finish_marquee(&mut self, start: Point, end: Point) {
        let click_size = self.config.grid_size * MARQUEE_CLICK_FRACTION;
        if (end.x - start.x).abs() < click_size && (end.y - start.y).abs() < click_size {
            debug!("marquee treated as click: selection cleared");
            self.ui.selection.clear();
            return;
        }
        let area = Rect::from_corners(start, end);
        let ids: BTreeSet<DrawerId> = self.doc.drawers().filter(|d| overlaps(&area, &d.rect())).map(|d| d.id).collect();
        debug!(count = ids.len(), "marquee selection");
        self.ui.selection.select_drawers(ids);
    }

    fn apply_click(&mut self, click: ClickAction) {
        match click {
            ClickAction::Nothing => {}
            ClickAction::ClearSelection => self.ui.selection.clear(),
            ClickAction::Select(element) => self.ui.selection.select_element(element),
        }
    }

    // --- Keyboard ---

    fn cancel_interaction(&mut self) -> Vec<Action> {
        if self.input.is_active() {
            debug!(state = self.input.name(), "escape: draft discarded");
        }
        self.input = InputState::Idle;
        self.ui.selection.clear();
        let mut actions = Vec::new();
        self.cancel_drag(&mut actions);
        actions.push(Action::SetCursor(self.tool_cursor().into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn toggle_split_orientation(&mut self) -> Vec<Action> {
        if self.ui.tool != Tool::Split || !self.ui.editable {
            return Vec::new();
        }
        self.ui.split_orientation = self.ui.split_orientation.toggled();
        if let Some(screen) = self.last_pointer.filter(|_| !self.input.is_active()) {
            let world = self.view.screen_to_world(screen);
            self.update_split_hover(world);
        }
        vec![Action::RenderNeeded]
    }

    // --- Helpers ---

    fn update_split_hover(&mut self, world: Point) -> Vec<Action> {
        if self.ui.tool != Tool::Split {
            return Vec::new();
        }
        let grid = self.config.grid_size;
        let orientation = self.ui.split_orientation;
        let drawer = drawer_at(&self.doc, world);
        self.ui.hover_drawer = drawer.map(|d| d.id);
        let hover = drawer.and_then(|d| split_line(d, world, orientation, grid));
        if hover == self.ui.split_hover {
            return Vec::new();
        }
        self.ui.split_hover = hover;
        vec![Action::RenderNeeded]
    }

    fn reconcile(&mut self) -> Vec<Action> {
        let doc = &self.doc;
        let stale = match &self.input {
            InputState::DraftSplit(line) => {
                !doc.contains_drawer(&line.drawer_id) || line.compartment_id.is_some_and(|c| doc.compartment(&c).is_none())
            }
            InputState::DraftResize { drawer_id, .. } => !doc.contains_drawer(drawer_id),
            InputState::DraftDividerMove { divider_id, .. } => !doc.contains_divider(divider_id),
            InputState::MovingSelection { origins, .. } => origins.iter().any(|(id, _)| !doc.contains_drawer(id)),
            _ => false,
        };
        if stale {
            debug!(state = self.input.name(), "snapshot removed a drafted entity: draft discarded");
            self.input = InputState::Idle;
        }
        if self.ui.selection.retain_existing(doc) {
            debug!("snapshot removed selected entities");
        }
        if self.ui.split_hover.is_some_and(|line| !doc.contains_drawer(&line.drawer_id)) {
            self.ui.split_hover = None;
        }
        if self.ui.hover_drawer.is_some_and(|id| !doc.contains_drawer(&id)) {
            self.ui.hover_drawer = None;
        }

        let mut actions = Vec::new();
        let dragged = self.drag.state();
        self.drag.prune(&self.doc);
        if let (Some(state), false) = (dragged, self.drag.is_dragging()) {
            actions.push(Action::ResetCompartmentShape { id: state.compartment_id });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn cancel_drag(&mut self, actions: &mut Vec<Action>) {
        if let Some(state) = self.drag.state() {
            debug!(compartment_id = %state.compartment_id, "compartment drag cancelled");
            self.drag.cancel();
            actions.push(Action::ResetCompartmentShape { id: state.compartment_id });
        }
    }

    fn is_empty_canvas(&self, world: Point) -> bool {
        drawer_at(&self.doc, world).is_none() && divider_at(&self.doc, world, self.handle_slop()).is_none()
    }

    /// Handle hit radius converted to world units at the current zoom.
    fn handle_slop(&self) -> f64 {
        self.view.viewport().screen_dist_to_world(self.config.handle_radius_px)
    }

    fn tool_cursor(&self) -> &'static str {
        match self.ui.tool {
            Tool::Select => "default",
            Tool::Pan => "grab",
            Tool::Drawer | Tool::Split | Tool::Divider => "crosshair",
        }
    }

    fn gesture_cursor(&self) -> Option<&'static str> {
        match &self.input {
            InputState::DraftResize { anchor, .. } => Some(anchor.cursor()),
            InputState::MovingSelection { .. } | InputState::DraftDividerMove { .. } => Some("move"),
            InputState::Pressing { .. } if self.ui.tool == Tool::Pan => Some("grabbing"),
            _ => None,
        }
    }
}

fn pressing(screen: Point, click: ClickAction) -> InputState {
    InputState::Pressing { origin_screen: screen, last_screen: screen, panning: false, click }
}

fn split_line(drawer: &Drawer, world: Point, orientation: SplitOrientation, grid_size: f64) -> Option<SplitLine> {
    let target = compartment_at(drawer, world);
    Some(SplitLine {
        drawer_id: drawer.id,
        compartment_id: target.map(|c| c.id),
        orientation,
        position: split_position(drawer, target, world, orientation, grid_size)?,
    })
}

/// Local split offset for a line through `world`.
///
/// The line sits on a grid line measured from the drawer's left (or top)
/// edge and stays strictly inside the target: the compartment's local
/// extent when there is one, else the whole drawer. When no grid line fits
/// inside the target the raw pointer offset is used, provided it is itself
/// strictly inside. Returns `None` when no non-degenerate line exists.
#[must_use]
pub fn split_position(
    drawer: &Drawer,
    target: Option<&Compartment>,
    world: Point,
    orientation: SplitOrientation,
    grid_size: f64,
) -> Option<f64> {
    let local = drawer.to_local(world);
    let bounds = target.map_or_else(|| Rect::new(0.0, 0.0, drawer.width, drawer.height), Compartment::local_rect);
    let (edge, pointer, lo, hi) = match orientation {
        SplitOrientation::Vertical => (-drawer.width / 2.0, local.x, bounds.left(), bounds.right()),
        SplitOrientation::Horizontal => (-drawer.height / 2.0, local.y, bounds.top(), bounds.bottom()),
    };
    let first = (((lo - edge) / grid_size).floor() + 1.0) * grid_size + edge;
    let last = (((hi - edge) / grid_size).ceil() - 1.0) * grid_size + edge;
    if first <= last {
        return Some((snap(pointer - edge, grid_size) + edge).clamp(first, last));
    }
    (pointer > lo && pointer < hi).then_some(pointer)
}

/// Candidate rectangle for dragging `anchor` by `delta` from `start`.
///
/// Only the edges the anchor touches move; moved edges snap to the grid and
/// cannot cross the opposite edge. The result is re-centered so its edges
/// sit on grid lines.
#[must_use]
pub fn resize_candidate(start: &Rect, anchor: ResizeAnchor, delta: Point, grid_size: f64) -> Rect {
    let (mut left, mut right) = (start.left(), start.right());
    let (mut top, mut bottom) = (start.top(), start.bottom());
    match anchor.x_sign() {
        1 => right = snap(right + delta.x, grid_size).max(left),
        -1 => left = snap(left + delta.x, grid_size).min(right),
        _ => {}
    }
    match anchor.y_sign() {
        1 => bottom = snap(bottom + delta.y, grid_size).max(top),
        -1 => top = snap(top + delta.y, grid_size).min(bottom),
        _ => {}
    }
    let rect = Rect::from_edges(left, top, right, bottom);
    Rect {
        x: snap_center_to_grid_edges(rect.x, rect.width, grid_size),
        y: snap_center_to_grid_edges(rect.y, rect.height, grid_size),
        ..rect
    }
}
