//! Shared numeric defaults for the editor engine.
//!
//! These seed [`crate::config::EditorConfig::default`]; the engine itself
//! always reads the live values from its config.

// ── Grid ────────────────────────────────────────────────────────

/// Snapping quantum in world units.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Fraction of a grid cell below which a marquee counts as a click.
pub const MARQUEE_CLICK_FRACTION: f64 = 0.25;

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// World-space padding around the drawer bounds for zoom-to-fit.
pub const DEFAULT_FIT_PADDING: f64 = 50.0;

/// Zoom multiplier for a zoom-to-location call without a target size.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Zoom multiplier per wheel notch.
pub const DEFAULT_WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Default duration of an animated zoom-to-location, in seconds.
pub const DEFAULT_ANIMATION_SECS: f64 = 0.3;

// ── Input ───────────────────────────────────────────────────────

/// Cumulative pointer travel (pixels) before a press becomes a pan.
pub const DEFAULT_PAN_THRESHOLD_PX: f64 = 3.0;

/// Screen-space hit slop in pixels for resize handles and divider hotspots.
pub const DEFAULT_HANDLE_RADIUS_PX: f64 = 8.0;
