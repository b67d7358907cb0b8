//! Viewer state container
//!
//! All mutable viewer state lives in [`ViewerState`] and changes only through
//! [`ViewerState::apply`]. Rendering reads a [`Scene`] snapshot; the
//! projection functions stay pure.

use arview_oui::input::OrientationReading;
use arview_oui::spatial::Quaternion;
use tracing::{debug, info, warn};

use crate::geo::GeoPosition;
use crate::marker::{place_markers, Marker, PlacedMarker, VisibilityGate};
use crate::orientation::{DeviceOrientation, OrientationTracker};
use crate::permission::{PermissionDecision, PermissionGate, PermissionState};

/// Every way the viewer state can change
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The permission prompt was shown
    PermissionRequested,
    /// The permission prompt was answered
    PermissionResolved(PermissionDecision),
    /// The platform delivers orientation without a prompt
    PermissionNotRequired,
    /// A raw orientation sample arrived
    Orientation(OrientationReading),
    /// The one-shot location query succeeded
    LocationAcquired(GeoPosition),
    /// The one-shot location query failed
    LocationFailed(String),
    /// The camera stream was acquired
    CameraStarted,
    /// Camera access was refused
    CameraDenied(String),
    /// The camera stream was released
    CameraReleased,
    /// The user tapped a marker
    MarkerSelected(String),
}

/// Camera feed lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraStatus {
    #[default]
    Pending,
    Streaming,
    Denied(String),
    Released,
}

impl CameraStatus {
    pub fn is_streaming(&self) -> bool {
        matches!(self, CameraStatus::Streaming)
    }
}

/// Progress through the two readiness gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Orientation permission not (yet) granted, or no sample received
    WaitingForPermission,
    /// Orientation is live but the viewer location is unknown
    LocatingViewer,
    /// Markers can be shown
    Ready,
}

impl Readiness {
    /// Status line shown while the scene is not ready
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Readiness::WaitingForPermission => Some("Waiting for orientation permission…"),
            Readiness::LocatingViewer => Some("Getting your location…"),
            Readiness::Ready => None,
        }
    }
}

/// What to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub camera: Quaternion,
    pub markers: Vec<PlacedMarker<'a>>,
}

/// Explicit viewer state
#[derive(Debug, Clone)]
pub struct ViewerState {
    permission: PermissionGate,
    tracker: OrientationTracker,
    location: Option<GeoPosition>,
    location_error: Option<String>,
    camera: CameraStatus,
    markers: Vec<Marker>,
    visible: VisibilityGate,
}

impl ViewerState {
    pub fn new(markers: Vec<Marker>) -> Self {
        let visible = VisibilityGate::from_markers(&markers);
        Self {
            permission: PermissionGate::new(),
            tracker: OrientationTracker::new(),
            location: None,
            location_error: None,
            camera: CameraStatus::default(),
            markers,
            visible,
        }
    }

    /// Apply one action. Out-of-order or repeated actions are logged and
    /// ignored; none of them is fatal.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::PermissionRequested => {
                if let Err(e) = self.permission.request() {
                    warn!(error = %e, "ignoring permission request");
                }
            }
            Action::PermissionResolved(decision) => match self.permission.resolve(decision) {
                Ok(()) => self.sync_tracker(),
                Err(e) => warn!(error = %e, "ignoring permission decision"),
            },
            Action::PermissionNotRequired => match self.permission.not_required() {
                Ok(()) => self.sync_tracker(),
                Err(e) => warn!(error = %e, "ignoring permission bypass"),
            },
            Action::Orientation(reading) => {
                self.tracker.record(&reading);
            }
            Action::LocationAcquired(position) => {
                if let Some(existing) = self.location {
                    debug!(%existing, "location already captured; ignoring new fix");
                } else {
                    info!(%position, "location acquired");
                    self.location = Some(position);
                    self.location_error = None;
                }
            }
            Action::LocationFailed(reason) => {
                warn!(%reason, "geolocation failed");
                if self.location.is_none() {
                    self.location_error = Some(reason);
                }
            }
            Action::CameraStarted => {
                info!("camera stream started");
                self.camera = CameraStatus::Streaming;
            }
            Action::CameraDenied(reason) => {
                warn!(%reason, "camera access denied");
                self.camera = CameraStatus::Denied(reason);
            }
            Action::CameraReleased => {
                debug!("camera stream released");
                if self.camera.is_streaming() {
                    self.camera = CameraStatus::Released;
                }
            }
            Action::MarkerSelected(id) => {
                if !self.visible.dismiss(&id) {
                    debug!(marker = %id, "selected marker is not visible");
                }
            }
        }
    }

    fn sync_tracker(&mut self) {
        if self.permission.allows_tracking() {
            self.tracker.activate();
        }
    }

    pub fn readiness(&self) -> Readiness {
        if !self.permission.allows_tracking() || !self.tracker.has_sample() {
            Readiness::WaitingForPermission
        } else if self.location.is_none() {
            Readiness::LocatingViewer
        } else {
            Readiness::Ready
        }
    }

    pub fn permission_state(&self) -> PermissionState {
        self.permission.state()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn orientation(&self) -> DeviceOrientation {
        self.tracker.current()
    }

    /// Whether a sample has been accepted since tracking started
    pub fn has_orientation(&self) -> bool {
        self.tracker.has_sample()
    }

    /// Camera rotation derived from the latest orientation
    pub fn camera_rotation(&self) -> Quaternion {
        self.tracker.current().camera_rotation()
    }

    /// Clockwise compass heading of the device
    pub fn heading(&self) -> f32 {
        self.tracker.current().heading()
    }

    pub fn location(&self) -> Option<GeoPosition> {
        self.location
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    pub fn camera_status(&self) -> &CameraStatus {
        &self.camera
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn visibility(&self) -> &VisibilityGate {
        &self.visible
    }

    /// Snapshot for rendering. Markers are only included once the viewer is
    /// ready, and dismissed markers are skipped.
    pub fn scene(&self) -> Scene<'_> {
        let markers = if self.readiness() == Readiness::Ready {
            place_markers(&self.markers)
                .into_iter()
                .filter(|p| self.visible.is_visible(&p.marker.id))
                .collect()
        } else {
            Vec::new()
        };

        Scene {
            camera: self.camera_rotation(),
            markers,
        }
    }

    /// The visible marker closest to the line of sight, if any lies within
    /// `max_angle_degrees` of it. Markers at the viewer's own position have
    /// no direction and are never picked.
    pub fn marker_at_reticle(&self, max_angle_degrees: f32) -> Option<&Marker> {
        let scene = self.scene();
        let forward = scene.camera.forward();

        scene
            .markers
            .into_iter()
            .filter(|p| p.position.to_vector().magnitude_squared() > f32::EPSILON)
            .map(|p| (p.marker, forward.angle(&p.position.to_vector()).to_degrees()))
            .filter(|(_, angle)| *angle <= max_angle_degrees)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(marker, _)| marker)
    }
}
