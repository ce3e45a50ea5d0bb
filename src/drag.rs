//! Compartment drag-and-drop: hover tracking and drop resolution.
//!
//! Runs alongside the tool state machine. The host forwards a compartment's
//! own drag events; moves are coalesced through a [`Mailbox`] and evaluated
//! once per animation frame. On release the drop resolves to a swap, a move
//! into an empty drawer, or nothing.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::Serialize;
use tracing::{debug, trace};

use crate::camera::Point;
use crate::doc::{CompartmentId, DocStore, Drawer, DrawerId};
use crate::grid::snap;
use crate::hit::{compartment_at, drawer_at};
use crate::mailbox::Mailbox;

/// The compartment being dragged and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragState {
    pub compartment_id: CompartmentId,
    pub from_drawer_id: DrawerId,
}

/// Drop target under the pointer as of the last evaluated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragHover {
    pub target_drawer_id: DrawerId,
    pub target_compartment_id: Option<CompartmentId>,
}

/// Outcome of a drop that changes the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropIntent {
    Swap { a: CompartmentId, b: CompartmentId },
    MoveToDrawer { compartment_id: CompartmentId, drawer_id: DrawerId, x: f64, y: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct DragSwap {
    state: Option<DragState>,
    hover: Option<DragHover>,
    pending: Mailbox<Point>,
}

impl DragSwap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> Option<DragState> {
        self.state
    }

    #[must_use]
    pub fn hover(&self) -> Option<DragHover> {
        self.hover
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Begin dragging `compartment_id`. The origin counts as the initial
    /// hover target so an immediate release is a no-op.
    ///
    /// Returns `false` if the compartment is unknown.
    pub fn start(&mut self, doc: &DocStore, compartment_id: CompartmentId) -> bool {
        let Some((drawer, _)) = doc.compartment(&compartment_id) else {
            return false;
        };
        self.state = Some(DragState { compartment_id, from_drawer_id: drawer.id });
        self.hover = Some(DragHover { target_drawer_id: drawer.id, target_compartment_id: Some(compartment_id) });
        self.pending.clear();
        true
    }

    /// Queue the latest pointer position. Returns `true` when a frame must be
    /// requested.
    pub fn post_move(&mut self, world: Point) -> bool {
        if self.state.is_none() {
            return false;
        }
        self.pending.post(world)
    }

    /// Evaluate the queued pointer position, if any. Returns `true` when the
    /// hover target was recomputed.
    pub fn flush(&mut self, doc: &DocStore) -> bool {
        let Some(world) = self.pending.take() else {
            return false;
        };
        if self.state.is_none() {
            return false;
        }
        self.hover = evaluate_hover(doc, world);
        trace!(x = world.x, y = world.y, hover = ?self.hover, "drag: hover evaluated");
        true
    }

    /// Finish the drag at `world` and resolve the drop.
    pub fn end(&mut self, doc: &DocStore, world: Point, grid_size: f64) -> Option<DropIntent> {
        let state = self.state.take()?;
        self.hover = None;
        self.pending.clear();
        resolve_drop(doc, state, world, grid_size)
    }

    /// Abandon the drag without resolving anything.
    pub fn cancel(&mut self) {
        self.state = None;
        self.hover = None;
        self.pending.clear();
    }

    /// Drop the drag if its compartment disappeared from the document.
    pub fn prune(&mut self, doc: &DocStore) {
        let Some(state) = self.state else {
            return;
        };
        if doc.compartment(&state.compartment_id).is_none() {
            debug!(compartment_id = %state.compartment_id, "drag: compartment removed mid-drag");
            self.cancel();
            return;
        }
        if let Some(hover) = self.hover {
            if !doc.contains_drawer(&hover.target_drawer_id) {
                self.hover = None;
            }
        }
    }
}

/// Drawer and compartment under `world`, falling back to the nearest
/// compartment center when the point misses every compartment.
#[must_use]
pub fn evaluate_hover(doc: &DocStore, world: Point) -> Option<DragHover> {
    let drawer = drawer_at(doc, world)?;
    Some(DragHover {
        target_drawer_id: drawer.id,
        target_compartment_id: compartment_at(drawer, world).map(|c| c.id),
    })
}

/// Decide what dropping the dragged compartment at `world` does.
#[must_use]
pub fn resolve_drop(doc: &DocStore, state: DragState, world: Point, grid_size: f64) -> Option<DropIntent> {
    let Some((_, dragged)) = doc.compartment(&state.compartment_id) else {
        debug!(compartment_id = %state.compartment_id, "drop discarded: compartment no longer exists");
        return None;
    };
    let Some(target) = topmost_drawer_containing(doc, world) else {
        debug!(compartment_id = %state.compartment_id, "drop discarded: no drawer under pointer");
        return None;
    };
    if target.is_rotated() {
        debug!(drawer_id = %target.id, "drop discarded: rotated drop target");
        return None;
    }

    if let Some(other) = compartment_at(target, world) {
        if other.id != dragged.id {
            debug!(a = %dragged.id, b = %other.id, "drop: swapping compartments");
            return Some(DropIntent::Swap { a: dragged.id, b: other.id });
        }
    }

    let empty = match target.compartments.as_slice() {
        [] => true,
        [only] => only.id == dragged.id,
        _ => false,
    };
    if !empty {
        debug!(drawer_id = %target.id, "drop discarded: no resolvable target compartment");
        return None;
    }

    let rect = target.rect();
    let left = clamp_start(snap(world.x - dragged.width / 2.0, grid_size), rect.left(), rect.right(), dragged.width);
    let top = clamp_start(snap(world.y - dragged.height / 2.0, grid_size), rect.top(), rect.bottom(), dragged.height);
    let x = left + dragged.width / 2.0 - target.x;
    let y = top + dragged.height / 2.0 - target.y;

    let unchanged = target.id == state.from_drawer_id
        && (x - dragged.x).abs() < f64::EPSILON
        && (y - dragged.y).abs() < f64::EPSILON;
    if unchanged {
        debug!(compartment_id = %dragged.id, "drop discarded: dropped in place");
        return None;
    }

    debug!(compartment_id = %dragged.id, drawer_id = %target.id, x, y, "drop: moving compartment to drawer");
    Some(DropIntent::MoveToDrawer { compartment_id: dragged.id, drawer_id: target.id, x, y })
}

/// Rotated drawers still block the drop, so they are not skipped here.
fn topmost_drawer_containing(doc: &DocStore, world: Point) -> Option<&Drawer> {
    doc.drawers_top_down().into_iter().find(|d| d.rect().contains(world))
}

// Keep [start, start + size] inside [lo, hi]; the low edge wins when it cannot fit.
fn clamp_start(start: f64, lo: f64, hi: f64, size: f64) -> f64 {
    start.min(hi - size).max(lo)
}
