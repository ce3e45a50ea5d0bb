#![allow(clippy::float_cmp)]

use super::*;

const GRID: f64 = 50.0;

#[test]
fn snap_rounds_to_nearest_line() {
    assert_eq!(snap(0.0, GRID), 0.0);
    assert_eq!(snap(24.0, GRID), 0.0);
    assert_eq!(snap(26.0, GRID), 50.0);
    assert_eq!(snap(-26.0, GRID), -50.0);
    assert_eq!(snap(-24.0, GRID), 0.0);
}

#[test]
fn snap_ties_round_up() {
    assert_eq!(snap(25.0, GRID), 50.0);
    assert_eq!(snap(-25.0, GRID), 0.0);
    assert_eq!(snap(75.0, GRID), 100.0);
}

#[test]
fn snap_just_below_midpoint_rounds_down() {
    let below_half = 0.5 - f64::EPSILON / 2.0;
    assert!(below_half < 0.5);
    assert_eq!(snap(below_half, 1.0), 0.0);
    assert_eq!(snap(below_half * GRID, GRID), 0.0);
}

#[test]
fn snap_is_idempotent_on_grid_lines() {
    for k in -10..=10 {
        let v = f64::from(k) * GRID;
        assert_eq!(snap(v, GRID), v);
        assert_eq!(snap(snap(v + 13.0, GRID), GRID), snap(v + 13.0, GRID));
    }
}

#[test]
fn snap_point_snaps_both_axes() {
    let p = snap_point(Point::new(61.0, -140.0), GRID);
    assert_eq!(p, Point::new(50.0, -150.0));
}

#[test]
fn edge_snap_keeps_odd_sized_rect_corners_on_grid() {
    // 150 wide: center 100 puts the left edge at 25, which snaps to 50.
    let c = snap_center_to_grid_edges(100.0, 150.0, GRID);
    assert_eq!(c, 125.0);
    assert_eq!(c - 75.0, 50.0);
}

#[test]
fn edge_snap_matches_plain_snap_for_even_multiples() {
    // 100 wide: edges already coincide with center snapping.
    assert_eq!(snap_center_to_grid_edges(110.0, 100.0, GRID), 100.0);
}

#[test]
fn snap_respects_custom_grid() {
    assert_eq!(snap(14.0, 10.0), 10.0);
    assert_eq!(snap(15.0, 10.0), 20.0);
    assert_eq!(snap_center_to_grid_edges(9.0, 5.0, 10.0), 12.5);
}
