//! Committed floor-plan entities and the read-only snapshot store.
//!
//! Drawers, their nested compartments, and free-standing dividers are owned by
//! the host's persistence layer. The engine receives them as whole snapshots
//! via [`DocStore::load_snapshot`] and never mutates them in place: every edit
//! leaves the engine as an [`crate::engine::Action`] and comes back, if
//! accepted, as the next snapshot.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::error::SnapshotError;
use crate::geom::{Rect, Segment};

pub type DrawerId = Uuid;
pub type CompartmentId = Uuid;
pub type DividerId = Uuid;

/// A rectangular drawer on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawer {
    pub id: DrawerId,
    /// Center x in world coordinates.
    pub x: f64,
    /// Center y in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees. Rotated drawers are excluded from split, resize and drop targeting.
    #[serde(default)]
    pub rotation: f64,
    /// Stacking order; higher values are on top.
    #[serde(default)]
    pub z_index: i64,
    #[serde(default)]
    pub compartments: Vec<Compartment>,
}

/// A sub-rectangle of a drawer, positioned relative to the drawer center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    pub id: CompartmentId,
    pub drawer_id: DrawerId,
    /// Center x relative to the parent drawer center.
    pub x: f64,
    /// Center y relative to the parent drawer center.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// A free line segment in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub id: DividerId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default = "default_divider_thickness")]
    pub thickness: f64,
}

fn default_divider_thickness() -> f64 {
    2.0
}

impl Drawer {
    /// World-space rectangle, ignoring rotation.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation.abs() > f64::EPSILON
    }

    /// Convert a world point into this drawer's local (center-relative) frame.
    #[must_use]
    pub fn to_local(&self, world: Point) -> Point {
        Point::new(world.x - self.x, world.y - self.y)
    }

    #[must_use]
    pub fn compartment(&self, id: &CompartmentId) -> Option<&Compartment> {
        self.compartments.iter().find(|c| &c.id == id)
    }

    /// World-space rectangle of one of this drawer's compartments.
    #[must_use]
    pub fn compartment_world_rect(&self, compartment: &Compartment) -> Rect {
        Rect::new(self.x + compartment.x, self.y + compartment.y, compartment.width, compartment.height)
    }
}

impl Compartment {
    /// Rectangle in the parent drawer's local frame.
    #[must_use]
    pub fn local_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Divider {
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment { x1: self.x1, y1: self.y1, x2: self.x2, y2: self.y2 }
    }
}

/// In-memory snapshot of committed entities.
pub struct DocStore {
    drawers: HashMap<DrawerId, Drawer>,
    dividers: HashMap<DividerId, Divider>,
    /// Compartment id -> owning drawer id.
    compartment_index: HashMap<CompartmentId, DrawerId>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { drawers: HashMap::new(), dividers: HashMap::new(), compartment_index: HashMap::new() }
    }

    /// Replace all entities with a full snapshot.
    pub fn load_snapshot(&mut self, drawers: Vec<Drawer>, dividers: Vec<Divider>) {
        self.drawers.clear();
        self.dividers.clear();
        self.compartment_index.clear();
        for drawer in drawers {
            for c in &drawer.compartments {
                self.compartment_index.insert(c.id, drawer.id);
            }
            self.drawers.insert(drawer.id, drawer);
        }
        for divider in dividers {
            self.dividers.insert(divider.id, divider);
        }
    }

    /// Validate a snapshot before loading it. The store is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] for duplicate ids, compartments whose `drawer_id`
    /// disagrees with their parent, or non-finite / negative geometry.
    pub fn try_load(&mut self, drawers: Vec<Drawer>, dividers: Vec<Divider>) -> Result<(), SnapshotError> {
        validate_snapshot(&drawers, &dividers)?;
        self.load_snapshot(drawers, dividers);
        Ok(())
    }

    #[must_use]
    pub fn drawer(&self, id: &DrawerId) -> Option<&Drawer> {
        self.drawers.get(id)
    }

    #[must_use]
    pub fn divider(&self, id: &DividerId) -> Option<&Divider> {
        self.dividers.get(id)
    }

    /// Look up a compartment together with its parent drawer.
    #[must_use]
    pub fn compartment(&self, id: &CompartmentId) -> Option<(&Drawer, &Compartment)> {
        let drawer = self.drawers.get(self.compartment_index.get(id)?)?;
        let compartment = drawer.compartment(id)?;
        Some((drawer, compartment))
    }

    /// All drawers sorted by `(z_index, id)` for draw order (bottom first).
    #[must_use]
    pub fn sorted_drawers(&self) -> Vec<&Drawer> {
        let mut drawers: Vec<&Drawer> = self.drawers.values().collect();
        drawers.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        drawers
    }

    /// All drawers topmost first, for hit-testing.
    #[must_use]
    pub fn drawers_top_down(&self) -> Vec<&Drawer> {
        let mut drawers = self.sorted_drawers();
        drawers.reverse();
        drawers
    }

    /// All dividers sorted by id for stable draw order.
    #[must_use]
    pub fn sorted_dividers(&self) -> Vec<&Divider> {
        let mut dividers: Vec<&Divider> = self.dividers.values().collect();
        dividers.sort_by_key(|d| d.id);
        dividers
    }

    /// Iterate drawers in arbitrary order.
    pub fn drawers(&self) -> impl Iterator<Item = &Drawer> {
        self.drawers.values()
    }

    /// Union of all drawer rectangles, or `None` when there are no drawers.
    #[must_use]
    pub fn drawer_bounds(&self) -> Option<Rect> {
        self.drawers
            .values()
            .map(Drawer::rect)
            .reduce(|acc, r| acc.union(&r))
    }

    #[must_use]
    pub fn contains_drawer(&self, id: &DrawerId) -> bool {
        self.drawers.contains_key(id)
    }

    #[must_use]
    pub fn contains_divider(&self, id: &DividerId) -> bool {
        self.dividers.contains_key(id)
    }

    /// Number of drawers currently in the store.
    #[must_use]
    pub fn drawer_count(&self) -> usize {
        self.drawers.len()
    }

    /// Number of dividers currently in the store.
    #[must_use]
    pub fn divider_count(&self) -> usize {
        self.dividers.len()
    }

    /// Returns `true` if the store holds neither drawers nor dividers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawers.is_empty() && self.dividers.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_snapshot(drawers: &[Drawer], dividers: &[Divider]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for drawer in drawers {
        if !seen.insert(drawer.id) {
            return Err(SnapshotError::DuplicateId(drawer.id));
        }
        if !valid_rect(drawer.x, drawer.y, drawer.width, drawer.height) || !drawer.rotation.is_finite() {
            return Err(SnapshotError::InvalidGeometry(drawer.id));
        }
        for c in &drawer.compartments {
            if !seen.insert(c.id) {
                return Err(SnapshotError::DuplicateId(c.id));
            }
            if c.drawer_id != drawer.id {
                return Err(SnapshotError::OrphanCompartment { compartment_id: c.id, drawer_id: c.drawer_id });
            }
            if !valid_rect(c.x, c.y, c.width, c.height) {
                return Err(SnapshotError::InvalidGeometry(c.id));
            }
        }
    }
    for d in dividers {
        if !seen.insert(d.id) {
            return Err(SnapshotError::DuplicateId(d.id));
        }
        let finite = [d.x1, d.y1, d.x2, d.y2, d.thickness].iter().all(|v| v.is_finite());
        if !finite || d.thickness < 0.0 {
            return Err(SnapshotError::InvalidGeometry(d.id));
        }
    }
    Ok(())
}

fn valid_rect(x: f64, y: f64, w: f64, h: f64) -> bool {
    x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0
}
