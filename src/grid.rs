//! Grid snapping.
//!
//! Positions and sizes are rounded to multiples of the grid size at commit
//! time. Rectangles are snapped by their edges, not their centers: a 150-wide
//! drawer centered on a grid line would otherwise have its corners land
//! half a cell off the grid.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::Point;

/// Round `v` to the nearest multiple of `grid_size`. Ties round up.
#[must_use]
pub fn snap(v: f64, grid_size: f64) -> f64 {
    let q = v / grid_size;
    let floor = q.floor();
    let cells = if q - floor >= 0.5 { floor + 1.0 } else { floor };
    cells * grid_size
}

/// Snap both coordinates of a point.
#[must_use]
pub fn snap_point(p: Point, grid_size: f64) -> Point {
    Point::new(snap(p.x, grid_size), snap(p.y, grid_size))
}

/// Return a center such that a rectangle of `size` centered there has its
/// leading edge on a grid line.
#[must_use]
pub fn snap_center_to_grid_edges(center: f64, size: f64, grid_size: f64) -> f64 {
    snap(center - size / 2.0, grid_size) + size / 2.0
}
