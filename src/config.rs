//! Editor configuration: grid, zoom limits and input thresholds.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use tracing::warn;

use crate::consts::{
    DEFAULT_FIT_PADDING, DEFAULT_GRID_SIZE, DEFAULT_HANDLE_RADIUS_PX, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_PAN_THRESHOLD_PX, DEFAULT_WHEEL_ZOOM_FACTOR, DEFAULT_ZOOM_STEP,
};
use crate::error::ConfigError;

/// Tunables for one editor session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snapping quantum in world units.
    pub grid_size: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// World-space padding added around the bounds for zoom-to-fit.
    pub fit_padding: f64,
    /// Pointer travel in pixels before a press turns into a pan.
    pub pan_threshold_px: f64,
    /// Zoom multiplier for zoom-to-location without a target size.
    pub zoom_step: f64,
    /// Zoom multiplier per wheel notch.
    pub wheel_zoom_factor: f64,
    /// Screen-space hit radius for handles.
    pub handle_radius_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
            pan_threshold_px: DEFAULT_PAN_THRESHOLD_PX,
            zoom_step: DEFAULT_ZOOM_STEP,
            wheel_zoom_factor: DEFAULT_WHEEL_ZOOM_FACTOR,
            handle_radius_px: DEFAULT_HANDLE_RADIUS_PX,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, defaulting anything absent.
    ///
    /// Optional:
    /// - `DRAWERPLAN_GRID_SIZE`: default 50
    /// - `DRAWERPLAN_MIN_ZOOM`: default 0.1
    /// - `DRAWERPLAN_MAX_ZOOM`: default 5.0
    /// - `DRAWERPLAN_FIT_PADDING`: default 50
    /// - `DRAWERPLAN_PAN_THRESHOLD_PX`: default 3
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting values fail [`EditorConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            grid_size: env_parse_f64("DRAWERPLAN_GRID_SIZE", defaults.grid_size),
            min_zoom: env_parse_f64("DRAWERPLAN_MIN_ZOOM", defaults.min_zoom),
            max_zoom: env_parse_f64("DRAWERPLAN_MAX_ZOOM", defaults.max_zoom),
            fit_padding: env_parse_f64("DRAWERPLAN_FIT_PADDING", defaults.fit_padding),
            pan_threshold_px: env_parse_f64("DRAWERPLAN_PAN_THRESHOLD_PX", defaults.pan_threshold_px),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a (possibly partial) JSON object; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        let zoom_ok = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom;
        if !zoom_ok {
            return Err(ConfigError::InvalidZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        let non_negative = [
            ("fit_padding", self.fit_padding),
            ("pan_threshold_px", self.pan_threshold_px),
            ("handle_radius_px", self.handle_radius_px),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        for (field, value) in [("zoom_step", self.zoom_step), ("wheel_zoom_factor", self.wheel_zoom_factor)] {
            if !value.is_finite() || value <= 1.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}

fn env_parse_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparsable editor config value; using default");
            default
        }),
        Err(_) => default,
    }
}
