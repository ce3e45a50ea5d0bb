#![allow(clippy::float_cmp)]

use super::*;

/// # Safety
/// Only `from_env_defaults_and_overrides` touches these variables.
unsafe fn clear_editor_env() {
    unsafe {
        std::env::remove_var("DRAWERPLAN_GRID_SIZE");
        std::env::remove_var("DRAWERPLAN_MIN_ZOOM");
        std::env::remove_var("DRAWERPLAN_MAX_ZOOM");
        std::env::remove_var("DRAWERPLAN_FIT_PADDING");
        std::env::remove_var("DRAWERPLAN_PAN_THRESHOLD_PX");
    }
}

#[test]
fn default_values() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.grid_size, 50.0);
    assert_eq!(cfg.min_zoom, 0.1);
    assert_eq!(cfg.max_zoom, 5.0);
    assert_eq!(cfg.pan_threshold_px, 3.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe {
        clear_editor_env();
    }
    assert_eq!(EditorConfig::from_env().unwrap(), EditorConfig::default());

    unsafe {
        std::env::set_var("DRAWERPLAN_GRID_SIZE", "25");
        std::env::set_var("DRAWERPLAN_MAX_ZOOM", "8");
        std::env::set_var("DRAWERPLAN_PAN_THRESHOLD_PX", "not-a-number");
    }
    let cfg = EditorConfig::from_env().unwrap();
    assert_eq!(cfg.grid_size, 25.0);
    assert_eq!(cfg.max_zoom, 8.0);
    assert_eq!(cfg.pan_threshold_px, 3.0);

    unsafe {
        std::env::set_var("DRAWERPLAN_GRID_SIZE", "0");
    }
    assert!(matches!(EditorConfig::from_env(), Err(ConfigError::InvalidGridSize(_))));

    unsafe { clear_editor_env() };
}

#[test]
fn from_json_partial_object_keeps_defaults() {
    let cfg = EditorConfig::from_json(r#"{"grid_size": 10, "min_zoom": 0.5}"#).unwrap();
    assert_eq!(cfg.grid_size, 10.0);
    assert_eq!(cfg.min_zoom, 0.5);
    assert_eq!(cfg.max_zoom, 5.0);
}

#[test]
fn from_json_malformed_is_parse_error() {
    assert!(matches!(EditorConfig::from_json("{grid_size"), Err(ConfigError::Parse(_))));
}

#[test]
fn validate_rejects_inverted_zoom_range() {
    let cfg = EditorConfig { min_zoom: 4.0, max_zoom: 2.0, ..EditorConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidZoomRange { .. })));
}

#[test]
fn validate_rejects_non_finite_grid() {
    let cfg = EditorConfig { grid_size: f64::INFINITY, ..EditorConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGridSize(_))));
}

#[test]
fn validate_rejects_shrinking_zoom_step() {
    let cfg = EditorConfig { zoom_step: 0.8, ..EditorConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidValue { field: "zoom_step", .. })));
}
