#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::Compartment;

// =============================================================
// Helpers
// =============================================================

fn make_drawer(x: f64, y: f64, w: f64, h: f64) -> Drawer {
    Drawer { id: Uuid::new_v4(), x, y, width: w, height: h, rotation: 0.0, z_index: 0, compartments: vec![] }
}

fn with_compartment(mut d: Drawer, w: f64, h: f64) -> Drawer {
    d.compartments.push(Compartment {
        id: Uuid::new_v4(),
        drawer_id: d.id,
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
        rotation: 0.0,
    });
    d
}

// =============================================================
// overlaps
// =============================================================

#[test]
fn overlapping_rects_collide() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(60.0, 60.0, 100.0, 100.0);
    assert!(overlaps(&a, &b));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(100.0, 0.0, 100.0, 100.0);
    assert!(!overlaps(&a, &b));
}

#[test]
fn separated_on_one_axis_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(10.0, 300.0, 100.0, 100.0);
    assert!(!overlaps(&a, &b));
}

#[test]
fn contained_rect_collides() {
    let outer = Rect::new(0.0, 0.0, 300.0, 300.0);
    let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(overlaps(&outer, &inner));
    assert!(overlaps(&inner, &outer));
}

// =============================================================
// bulk_move_collision
// =============================================================

#[test]
fn bulk_move_into_stationary_drawer_collides() {
    let a = make_drawer(0.0, 0.0, 100.0, 100.0);
    let b = make_drawer(200.0, 0.0, 100.0, 100.0);
    let moving = BTreeSet::from([a.id]);
    let overrides = HashMap::from([(a.id, Point::new(150.0, 0.0))]);
    assert!(bulk_move_collision(&moving, &overrides, &[&a, &b]));
}

#[test]
fn bulk_move_ignores_overlap_among_moving_drawers() {
    let a = make_drawer(0.0, 0.0, 100.0, 100.0);
    let b = make_drawer(100.0, 0.0, 100.0, 100.0);
    let moving = BTreeSet::from([a.id, b.id]);
    let overrides = HashMap::from([(a.id, Point::new(50.0, 0.0)), (b.id, Point::new(100.0, 0.0))]);
    assert!(!bulk_move_collision(&moving, &overrides, &[&a, &b]));
}

#[test]
fn bulk_move_to_free_space_is_clear() {
    let a = make_drawer(0.0, 0.0, 100.0, 100.0);
    let b = make_drawer(200.0, 0.0, 100.0, 100.0);
    let moving = BTreeSet::from([a.id]);
    let overrides = HashMap::from([(a.id, Point::new(0.0, 200.0))]);
    assert!(!bulk_move_collision(&moving, &overrides, &[&a, &b]));
}

#[test]
fn bulk_move_without_override_uses_committed_position() {
    let a = make_drawer(0.0, 0.0, 100.0, 100.0);
    let b = make_drawer(50.0, 0.0, 100.0, 100.0);
    let moving = BTreeSet::from([a.id]);
    assert!(bulk_move_collision(&moving, &HashMap::new(), &[&a, &b]));
}

// =============================================================
// resize_is_valid
// =============================================================

#[test]
fn resize_below_min_is_invalid() {
    let min = MinSize { width: 50.0, height: 50.0 };
    assert!(!resize_is_valid(&Rect::new(0.0, 0.0, 40.0, 100.0), &[], min));
    assert!(resize_is_valid(&Rect::new(0.0, 0.0, 50.0, 50.0), &[], min));
}

#[test]
fn resize_into_neighbor_is_invalid() {
    let other = make_drawer(200.0, 0.0, 100.0, 100.0);
    let min = MinSize { width: 50.0, height: 50.0 };
    assert!(!resize_is_valid(&Rect::new(75.0, 0.0, 250.0, 100.0), &[&other], min));
    assert!(resize_is_valid(&Rect::new(50.0, 0.0, 200.0, 100.0), &[&other], min));
}

// =============================================================
// min_resize_size
// =============================================================

#[test]
fn empty_drawer_min_is_one_cell() {
    let d = make_drawer(0.0, 0.0, 300.0, 200.0);
    assert_eq!(min_resize_size(&d, 50.0), MinSize { width: 50.0, height: 50.0 });
}

#[test]
fn smallest_compartment_scales_min_size() {
    // Smallest compartment is 100 of 400 wide: shrinking below 200 would
    // squeeze it under 50.
    let d = with_compartment(with_compartment(make_drawer(0.0, 0.0, 400.0, 200.0), 300.0, 200.0), 100.0, 200.0);
    let min = min_resize_size(&d, 50.0);
    assert_eq!(min.width, 200.0);
    assert_eq!(min.height, 50.0);
}

#[test]
fn min_size_never_below_one_cell() {
    let d = with_compartment(make_drawer(0.0, 0.0, 100.0, 100.0), 100.0, 100.0);
    let min = min_resize_size(&d, 50.0);
    assert_eq!(min, MinSize { width: 50.0, height: 50.0 });
}
