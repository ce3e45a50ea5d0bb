//! Axis-aligned collision checks used to validate moves and resizes.
//!
//! Rotation is ignored throughout; rotated drawers are never split or resize
//! targets, and moves treat every drawer by its unrotated bounds.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use std::collections::{BTreeSet, HashMap};

use crate::camera::Point;
use crate::doc::{Drawer, DrawerId};
use crate::geom::Rect;

/// Minimum dimensions a resized drawer must keep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

/// Strict overlap: rectangles that only share an edge do not collide.
#[must_use]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    (a.x - b.x).abs() < a.half_width() + b.half_width() && (a.y - b.y).abs() < a.half_height() + b.half_height()
}

/// Whether any moving drawer, at its overridden position, overlaps a drawer
/// that is not part of the move.
///
/// Moving drawers without an override are tested at their committed position.
#[must_use]
pub fn bulk_move_collision(
    moving_ids: &BTreeSet<DrawerId>,
    overrides: &HashMap<DrawerId, Point>,
    drawers: &[&Drawer],
) -> bool {
    let (moving, stationary): (Vec<&Drawer>, Vec<&Drawer>) =
        drawers.iter().copied().partition(|d| moving_ids.contains(&d.id));

    moving.iter().any(|m| {
        let rect = match overrides.get(&m.id) {
            Some(p) => m.rect().with_center(*p),
            None => m.rect(),
        };
        stationary.iter().any(|s| overlaps(&rect, &s.rect()))
    })
}

/// Whether `candidate` is an acceptable resize result: at least `min` in
/// both dimensions and clear of every drawer in `others`.
#[must_use]
pub fn resize_is_valid(candidate: &Rect, others: &[&Drawer], min: MinSize) -> bool {
    if candidate.width < min.width || candidate.height < min.height {
        return false;
    }
    !others.iter().any(|d| overlaps(candidate, &d.rect()))
}

/// Minimum size for resizing `drawer` so that its smallest compartment,
/// scaled with the drawer, stays at least one grid cell.
///
/// A drawer without compartments only needs to stay one cell in each axis.
#[must_use]
pub fn min_resize_size(drawer: &Drawer, grid_size: f64) -> MinSize {
    let smallest_w = drawer
        .compartments
        .iter()
        .map(|c| c.width)
        .filter(|w| *w > 0.0)
        .fold(f64::INFINITY, f64::min);
    let smallest_h = drawer
        .compartments
        .iter()
        .map(|c| c.height)
        .filter(|h| *h > 0.0)
        .fold(f64::INFINITY, f64::min);

    MinSize {
        width: scaled_min(drawer.width, smallest_w, grid_size),
        height: scaled_min(drawer.height, smallest_h, grid_size),
    }
}

// new_size * (smallest / size) >= grid  <=>  new_size >= grid * size / smallest
fn scaled_min(size: f64, smallest: f64, grid_size: f64) -> f64 {
    if !smallest.is_finite() || size <= 0.0 {
        return grid_size;
    }
    (grid_size * size / smallest).max(grid_size)
}
