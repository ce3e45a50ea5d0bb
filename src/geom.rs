//! Center-based rectangles and line segments in world space.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Axis-aligned rectangle described by its center and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Center x in world coordinates.
    pub x: f64,
    /// Center y in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build the normalized rectangle spanned by two opposite corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        let width = (a.x - b.x).abs();
        let height = (a.y - b.y).abs();
        Self::from_edges(left, top, left + width, top + height)
    }

    /// Build a rectangle from its four edges.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: (left + right) / 2.0,
            y: (top + bottom) / 2.0,
            width: right - left,
            height: bottom - top,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x - self.half_width()
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.half_width()
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y - self.half_height()
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.half_height()
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.x).abs() <= self.half_width() && (p.y - self.y).abs() <= self.half_height()
    }

    /// Same rectangle moved so its center is `center`.
    #[must_use]
    pub fn with_center(self, center: Point) -> Self {
        Self { x: center.x, y: center.y, ..self }
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow every side by `pad`.
    #[must_use]
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect { width: self.width + pad * 2.0, height: self.height + pad * 2.0, ..*self }
    }
}

/// A straight line segment between two world points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { x1: start.x, y1: start.y, x2: end.x, y2: end.y }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    /// Both endpoints shifted by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Segment {
        Segment::new(self.start().add(delta), self.end().add(delta))
    }

    /// Shortest distance from `p` to any point on the segment.
    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f64::EPSILON {
            return p.distance(self.start());
        }
        let t = (((p.x - self.x1) * dx + (p.y - self.y1) * dy) / len_sq).clamp(0.0, 1.0);
        p.distance(Point::new(self.x1 + t * dx, self.y1 + t * dy))
    }
}
