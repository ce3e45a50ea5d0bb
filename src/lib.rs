//! Interactive geometry and interaction engine for a drawer floor-plan editor.
//!
//! The host UI feeds raw pointer, wheel and keyboard events plus snapshots of
//! the committed drawers, compartments and dividers. The engine answers with
//! [`engine::Action`]s (mutation intents for the persistence layer, cursor
//! hints, frame requests) and exposes a [`render::Scene`] view-model for the
//! painter. Persistence, authentication and actual drawing stay with the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine and the [`engine::EngineCore`] entry point |
//! | [`input`] | Tools, buttons, selection, and the gesture state union |
//! | [`drag`] | Compartment drag-and-drop: hover tracking, swap/move resolution |
//! | [`viewport`] | Clamped zoom, coalesced pan, fit and animated zoom-to-location |
//! | [`camera`] | `Point` and the pure world/screen transform |
//! | [`doc`] | Committed entity records and the snapshot store |
//! | [`hit`] | Hit-testing drawers, compartments, dividers and handles |
//! | [`collision`] | Axis-aligned overlap checks for moves and resizes |
//! | [`grid`] | Grid snapping |
//! | [`geom`] | Center-based rectangles and segments |
//! | [`mailbox`] | Latest-value-wins per-frame mailboxes |
//! | [`render`] | Per-frame view-model projection |
//! | [`config`] | Editor configuration from defaults, env or JSON |
//! | [`error`] | Configuration and snapshot errors |
//! | [`consts`] | Shared numeric defaults |

pub mod camera;
pub mod collision;
pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geom;
pub mod grid;
pub mod hit;
pub mod input;
pub mod mailbox;
pub mod render;
pub mod viewport;
