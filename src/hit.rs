//! Hit-testing against drawers, compartments, dividers and their handles.
//!
//! All functions take world-space points. Screen-space slop (handle radius)
//! must be converted to world units by the caller using the current zoom.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{Compartment, Divider, DocStore, Drawer};
use crate::geom::Rect;

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [ResizeAnchor; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Horizontal edge this handle drags: -1 left, 1 right, 0 neither.
    #[must_use]
    pub fn x_sign(self) -> i8 {
        match self {
            Self::E | Self::Ne | Self::Se => 1,
            Self::W | Self::Nw | Self::Sw => -1,
            Self::N | Self::S => 0,
        }
    }

    /// Vertical edge this handle drags: -1 top, 1 bottom, 0 neither.
    #[must_use]
    pub fn y_sign(self) -> i8 {
        match self {
            Self::S | Self::Se | Self::Sw => 1,
            Self::N | Self::Ne | Self::Nw => -1,
            Self::E | Self::W => 0,
        }
    }

    /// World position of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        Point::new(
            rect.x + f64::from(self.x_sign()) * rect.half_width(),
            rect.y + f64::from(self.y_sign()) * rect.half_height(),
        )
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Which part of a selected divider a drag grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerHandle {
    Start,
    End,
    /// The whole line; both endpoints move together.
    Line,
}

/// Topmost unrotated drawer containing `world`.
#[must_use]
pub fn drawer_at(doc: &DocStore, world: Point) -> Option<&Drawer> {
    doc.drawers_top_down()
        .into_iter()
        .filter(|d| !d.is_rotated())
        .find(|d| d.rect().contains(world))
}

/// Compartment of `drawer` whose rectangle contains `world`.
#[must_use]
pub fn compartment_containing(drawer: &Drawer, world: Point) -> Option<&Compartment> {
    let local = drawer.to_local(world);
    drawer.compartments.iter().find(|c| c.local_rect().contains(local))
}

/// Compartment under `world`, falling back to the one with the nearest
/// center when the point misses every compartment rectangle.
///
/// Returns `None` only when the drawer has no compartments.
#[must_use]
pub fn compartment_at(drawer: &Drawer, world: Point) -> Option<&Compartment> {
    if let Some(c) = compartment_containing(drawer, world) {
        return Some(c);
    }
    let local = drawer.to_local(world);
    drawer
        .compartments
        .iter()
        .min_by(|a, b| {
            let da = local.distance(Point::new(a.x, a.y));
            let db = local.distance(Point::new(b.x, b.y));
            da.total_cmp(&db)
        })
}

/// Resize handle of `rect` within `slop` world units of `world`, if any.
///
/// Corners are checked before edge midpoints so small rectangles favor the
/// two-axis handle.
#[must_use]
pub fn resize_handle_at(rect: &Rect, world: Point, slop: f64) -> Option<ResizeAnchor> {
    const ORDER: [ResizeAnchor; 8] = [
        ResizeAnchor::Nw,
        ResizeAnchor::Ne,
        ResizeAnchor::Se,
        ResizeAnchor::Sw,
        ResizeAnchor::N,
        ResizeAnchor::E,
        ResizeAnchor::S,
        ResizeAnchor::W,
    ];
    ORDER.into_iter().find(|a| a.position(rect).distance(world) <= slop)
}

/// Hotspot of `divider` under `world`: endpoints first, then the line body.
#[must_use]
pub fn divider_handle_at(divider: &Divider, world: Point, slop: f64) -> Option<DividerHandle> {
    let seg = divider.segment();
    if seg.start().distance(world) <= slop {
        return Some(DividerHandle::Start);
    }
    if seg.end().distance(world) <= slop {
        return Some(DividerHandle::End);
    }
    if seg.distance_to(world) <= line_tolerance(divider, slop) {
        return Some(DividerHandle::Line);
    }
    None
}

/// Divider whose line passes closest to `world`, within tolerance.
#[must_use]
pub fn divider_at(doc: &DocStore, world: Point, slop: f64) -> Option<&Divider> {
    doc.sorted_dividers()
        .into_iter()
        .map(|d| (d, d.segment().distance_to(world)))
        .filter(|(d, dist)| *dist <= line_tolerance(d, slop))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(d, _)| d)
}

fn line_tolerance(divider: &Divider, slop: f64) -> f64 {
    (divider.thickness / 2.0).max(slop)
}
