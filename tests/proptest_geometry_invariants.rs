//! Property-based invariant tests for snapping, the viewport transform and
//! the collision oracle.
//!
//! 1. snap is idempotent and lands on a grid multiple within half a cell.
//! 2. Edge snapping puts the leading edge on a grid line and keeps the size.
//! 3. Zoom keeps the world point under the zoom center fixed.
//! 4. Zoom never leaves [min_zoom, max_zoom], however often it is applied.
//! 5. overlaps is symmetric.
//! 6. Resize candidates keep grid-aligned edges and never invert.
//! 7. Split positions stay strictly inside the drawer.
//! 8. Drawer drafts only commit grid-aligned rectangles of at least one cell.
//! 9. Mailboxes coalesce: one frame request per batch, last value wins.

use drawerplan::camera::{Point, Viewport};
use drawerplan::collision::overlaps;
use drawerplan::config::EditorConfig;
use drawerplan::doc::Drawer;
use drawerplan::engine::{Action, EngineCore, resize_candidate, split_position};
use drawerplan::geom::Rect;
use drawerplan::grid::{snap, snap_center_to_grid_edges};
use drawerplan::hit::ResizeAnchor;
use drawerplan::input::{Button, SplitOrientation, Tool};
use drawerplan::mailbox::Mailbox;
use drawerplan::viewport::ViewportController;
use proptest::prelude::*;
use uuid::Uuid;

// ── Helpers ─────────────────────────────────────────────────────────────

const TOLERANCE: f64 = 1e-6;

fn grid_size() -> impl Strategy<Value = f64> {
    prop_oneof![Just(10.0), Just(25.0), Just(50.0), Just(100.0)]
}

fn coord() -> impl Strategy<Value = f64> {
    -10_000.0f64..10_000.0
}

fn extent() -> impl Strategy<Value = f64> {
    1.0f64..2_000.0
}

fn rect() -> impl Strategy<Value = Rect> {
    (coord(), coord(), extent(), extent()).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn anchor() -> impl Strategy<Value = ResizeAnchor> {
    proptest::sample::select(ResizeAnchor::ALL.to_vec())
}

fn is_multiple(v: f64, grid: f64) -> bool {
    let q = v / grid;
    (q - q.round()).abs() < TOLERANCE
}

fn controller(viewport: Viewport) -> ViewportController {
    let mut view = ViewportController::new(&EditorConfig::default());
    view.set_size(800.0, 600.0);
    view.set_viewport(viewport);
    view
}

// ═════════════════════════════════════════════════════════════════════════
// 1. snap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_is_idempotent(v in coord(), grid in grid_size()) {
        let once = snap(v, grid);
        let twice = snap(once, grid);
        prop_assert!((once - twice).abs() < TOLERANCE, "snap({v}) = {once}, snap again = {twice}");
    }

    #[test]
    fn snap_lands_on_nearest_multiple(v in coord(), grid in grid_size()) {
        let s = snap(v, grid);
        prop_assert!(is_multiple(s, grid), "{s} is not a multiple of {grid}");
        prop_assert!((s - v).abs() <= grid / 2.0 + TOLERANCE, "snap({v}) = {s} is more than half a cell away");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Edge snapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edge_snap_puts_leading_edge_on_grid(center in coord(), size in extent(), grid in grid_size()) {
        let c = snap_center_to_grid_edges(center, size, grid);
        let left = c - size / 2.0;
        prop_assert!(is_multiple(left, grid), "left edge {left} off grid for center {center}, size {size}");
        prop_assert!((c - center).abs() <= grid / 2.0 + TOLERANCE);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Zoom at point
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_keeps_world_point_under_cursor(
        x in -1_000.0f64..1_000.0,
        y in -1_000.0f64..1_000.0,
        zoom in 0.1f64..5.0,
        factor in 0.2f64..5.0,
        cx in 0.0f64..800.0,
        cy in 0.0f64..600.0,
    ) {
        let mut view = controller(Viewport::new(x, y, zoom));
        let center = Point::new(cx, cy);
        let before = view.screen_to_world(center);
        view.zoom(factor, center);
        let after = view.screen_to_world(center);
        prop_assert!((before.x - after.x).abs() < TOLERANCE, "x drifted: {} -> {}", before.x, after.x);
        prop_assert!((before.y - after.y).abs() < TOLERANCE, "y drifted: {} -> {}", before.y, after.y);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Zoom clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_stays_within_limits(factors in proptest::collection::vec(prop_oneof![Just(10.0), Just(0.01), 0.5f64..2.0], 1..40)) {
        let config = EditorConfig::default();
        let mut view = controller(Viewport::new(400.0, 300.0, 1.0));
        for factor in factors {
            view.zoom(factor, Point::new(400.0, 300.0));
            let z = view.viewport().zoom;
            prop_assert!(z <= config.max_zoom + TOLERANCE, "zoom {z} above max");
            prop_assert!(z >= config.min_zoom - TOLERANCE, "zoom {z} below min");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Collision symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlaps_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn rect_overlaps_itself(a in rect()) {
        prop_assert!(overlaps(&a, &a));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Resize candidates
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_candidate_is_grid_aligned(
        cells_x in -20i32..20,
        cells_y in -20i32..20,
        cells_w in 1i32..10,
        cells_h in 1i32..10,
        anchor in anchor(),
        dx in -1_000.0f64..1_000.0,
        dy in -1_000.0f64..1_000.0,
    ) {
        let grid = 50.0;
        let start = Rect::from_edges(
            f64::from(cells_x) * grid,
            f64::from(cells_y) * grid,
            f64::from(cells_x + cells_w) * grid,
            f64::from(cells_y + cells_h) * grid,
        );
        let r = resize_candidate(&start, anchor, Point::new(dx, dy), grid);
        prop_assert!(r.width >= 0.0 && r.height >= 0.0);
        prop_assert!(is_multiple(r.left(), grid), "left {} off grid", r.left());
        prop_assert!(is_multiple(r.top(), grid), "top {} off grid", r.top());
        prop_assert!(is_multiple(r.width, grid), "width {} off grid", r.width);
        prop_assert!(is_multiple(r.height, grid), "height {} off grid", r.height);
        if anchor.x_sign() == 0 {
            prop_assert!((r.left() - start.left()).abs() < TOLERANCE && (r.width - start.width).abs() < TOLERANCE);
        }
        if anchor.y_sign() == 0 {
            prop_assert!((r.top() - start.top()).abs() < TOLERANCE && (r.height - start.height).abs() < TOLERANCE);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Split position bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn split_position_stays_strictly_inside_drawer(
        x in coord(),
        y in coord(),
        w in extent(),
        h in extent(),
        px in coord(),
        py in coord(),
        horizontal in any::<bool>(),
    ) {
        let drawer = Drawer {
            id: Uuid::new_v4(),
            x,
            y,
            width: w,
            height: h,
            rotation: 0.0,
            z_index: 0,
            compartments: vec![],
        };
        let orientation = if horizontal { SplitOrientation::Horizontal } else { SplitOrientation::Vertical };
        let half = if horizontal { h / 2.0 } else { w / 2.0 };
        if let Some(p) = split_position(&drawer, None, Point::new(px, py), orientation, 50.0) {
            prop_assert!(p.abs() < half, "position {p} not strictly inside half-extent {half}");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Drawer drafts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn created_drawers_are_grid_aligned(
        sx in -500.0f64..500.0,
        sy in -500.0f64..500.0,
        ex in -500.0f64..500.0,
        ey in -500.0f64..500.0,
    ) {
        let grid = 50.0;
        let mut core = EngineCore::new();
        core.set_viewport_size(800.0, 600.0);
        core.view.set_viewport(Viewport::new(0.0, 0.0, 1.0));
        core.set_tool(Tool::Drawer);

        core.on_pointer_down(Point::new(sx, sy), Button::Primary);
        core.on_pointer_move(Point::new(ex, ey));
        let actions = core.on_pointer_up(Point::new(ex, ey), Button::Primary);

        for action in &actions {
            if let Action::CreateDrawer { x, y, width, height } = *action {
                prop_assert!(width >= grid && height >= grid, "{width}x{height} below one cell");
                prop_assert!(is_multiple(width, grid) && is_multiple(height, grid));
                prop_assert!(is_multiple(x - width / 2.0, grid), "left edge off grid");
                prop_assert!(is_multiple(y - height / 2.0, grid), "top edge off grid");
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Mailbox coalescing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mailbox_requests_one_frame_per_batch(values in proptest::collection::vec(any::<i32>(), 1..50)) {
        let mut mailbox = Mailbox::new();
        let requests = values.iter().filter(|&&v| mailbox.post(v)).count();
        prop_assert_eq!(requests, 1);
        prop_assert_eq!(mailbox.take(), values.last().copied());
        prop_assert_eq!(mailbox.take(), None);
    }
}
