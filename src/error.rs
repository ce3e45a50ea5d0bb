//! Error types for the fallible edges of the engine.
//!
//! Interaction itself never fails: invalid gestures are discarded, not
//! reported. Errors only arise when the host hands the engine bad
//! configuration or a structurally unsound snapshot.

use uuid::Uuid;

/// Error returned by [`crate::config::EditorConfig`] constructors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The grid size is zero, negative, or not finite.
    #[error("invalid grid size: {0}")]
    InvalidGridSize(f64),
    /// Zoom limits are non-positive, not finite, or inverted.
    #[error("invalid zoom range: min {min}, max {max}")]
    InvalidZoomRange { min: f64, max: f64 },
    /// A positive tunable (padding, threshold, step) is out of range.
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
    /// The JSON document could not be parsed.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error returned by [`crate::doc::DocStore::try_load`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SnapshotError {
    /// Two entities in the snapshot share an id.
    #[error("duplicate entity id: {0}")]
    DuplicateId(Uuid),
    /// A compartment claims a parent other than the drawer it is nested in.
    #[error("compartment {compartment_id} references drawer {drawer_id} but is nested elsewhere")]
    OrphanCompartment { compartment_id: Uuid, drawer_id: Uuid },
    /// Position or size is not finite, or a size is negative.
    #[error("invalid geometry on entity {0}")]
    InvalidGeometry(Uuid),
}
