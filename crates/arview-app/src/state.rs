//! Application state for the viewer session

use arview_core::config::OrientationMode;
use arview_core::{Action, Marker, Readiness, ViewerState};

use crate::sensors::SensorHandle;

/// Everything the UI loop owns for one viewer session
pub struct AppState {
    /// Reducer-driven viewer state
    pub viewer: ViewerState,
    /// Live sensors feeding `viewer`
    pub sensors: SensorHandle,
    /// Where orientation samples come from
    pub orientation_mode: OrientationMode,
    /// Selection tolerance around the reticle
    pub reticle_degrees: f32,
    /// Current tick
    pub tick: u64,
    /// Last feedback shown in the status line
    pub status_message: Option<String>,
    /// Show the key help line
    pub show_help: bool,
}

impl AppState {
    pub fn new(
        markers: Vec<Marker>,
        sensors: SensorHandle,
        orientation_mode: OrientationMode,
        reticle_degrees: f32,
    ) -> Self {
        Self {
            viewer: ViewerState::new(markers),
            sensors,
            orientation_mode,
            reticle_degrees,
            tick: 0,
            status_message: None,
            show_help: true,
        }
    }

    /// Apply everything the sensors reported since the last tick
    pub fn drain_sensors(&mut self) -> usize {
        let actions = self.sensors.drain();
        let count = actions.len();
        for action in actions {
            self.viewer.apply(action);
        }
        count
    }

    /// Whether keyboard orientation samples should reach the tracker
    pub fn accepts_keyboard_orientation(&self) -> bool {
        self.orientation_mode == OrientationMode::Keyboard
    }

    /// Marker currently under the reticle, if the scene is showing
    pub fn targeted_marker(&self) -> Option<&Marker> {
        if self.viewer.readiness() != Readiness::Ready {
            return None;
        }
        self.viewer.marker_at_reticle(self.reticle_degrees)
    }

    /// Dismiss the marker under the reticle, returning its label
    pub fn select_at_reticle(&mut self) -> Option<String> {
        let (id, label) = self
            .targeted_marker()
            .map(|m| (m.id.clone(), m.label.clone()))?;
        self.viewer.apply(Action::MarkerSelected(id));
        Some(label)
    }
}
