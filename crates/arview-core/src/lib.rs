//! arview-core: the viewer's coordinate math and state
//!
//! - [`projection`]: device orientation to camera rotation, and
//!   (distance, bearing) to render-space offsets
//! - [`orientation`] and [`permission`]: the sensor side, gated on a one-shot
//!   permission request
//! - [`marker`]: the marker catalog and the visibility set
//! - [`state`]: the explicit state container driven by [`state::Action`]s
//! - [`config`]: TOML configuration

pub mod config;
pub mod error;
pub mod geo;
pub mod marker;
pub mod orientation;
pub mod permission;
pub mod projection;
pub mod state;

pub use config::ViewerConfig;
pub use error::{ConfigError, GateError};
pub use geo::GeoPosition;
pub use marker::{place_markers, Marker, PlacedMarker, VisibilityGate};
pub use orientation::{DeviceOrientation, OrientationTracker};
pub use permission::{PermissionDecision, PermissionGate, PermissionState};
pub use projection::{compass_heading, orientation_to_camera_rotation, polar_to_offset, MARKER_SCALE};
pub use state::{Action, CameraStatus, Readiness, Scene, ViewerState};
