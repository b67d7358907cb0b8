//! Orientation tracker
//!
//! Keeps the latest complete device-orientation sample. The tracker stays
//! inert until it is activated, which happens once the permission gate allows
//! tracking.

use arview_oui::input::OrientationReading;
use arview_oui::spatial::Quaternion;
use tracing::{debug, trace};

use crate::projection::{compass_heading, orientation_to_camera_rotation};

/// Device orientation in degrees (alpha = heading, beta = front-back tilt,
/// gamma = left-right tilt)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceOrientation {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl DeviceOrientation {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Camera rotation for this orientation
    pub fn camera_rotation(&self) -> Quaternion {
        orientation_to_camera_rotation(self.alpha, self.beta, self.gamma)
    }

    /// Clockwise compass heading in degrees
    pub fn heading(&self) -> f32 {
        compass_heading(self.alpha)
    }
}

/// Latest-sample orientation tracker
#[derive(Debug, Clone, Default)]
pub struct OrientationTracker {
    current: DeviceOrientation,
    active: bool,
    samples: u64,
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting samples
    pub fn activate(&mut self) {
        if !self.active {
            debug!("orientation tracking activated");
            self.active = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Store a sample as the current orientation.
    ///
    /// Returns false when the tracker is inactive or the sample is missing a
    /// component; the current state is left untouched in both cases.
    pub fn record(&mut self, reading: &OrientationReading) -> bool {
        if !self.active {
            return false;
        }
        let Some((alpha, beta, gamma)) = reading.angles() else {
            trace!(?reading, "ignoring incomplete orientation sample");
            return false;
        };
        self.current = DeviceOrientation::new(alpha, beta, gamma);
        self.samples += 1;
        true
    }

    /// Latest orientation, {0, 0, 0} until the first sample arrives
    pub fn current(&self) -> DeviceOrientation {
        self.current
    }

    pub fn has_sample(&self) -> bool {
        self.samples > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let tracker = OrientationTracker::new();
        assert_eq!(tracker.current(), DeviceOrientation::default());
        assert!(!tracker.is_active());
        assert!(!tracker.has_sample());
    }

    #[test]
    fn test_ignores_samples_before_activation() {
        let mut tracker = OrientationTracker::new();
        assert!(!tracker.record(&OrientationReading::complete(10.0, 80.0, 5.0)));
        assert_eq!(tracker.current(), DeviceOrientation::default());
    }

    #[test]
    fn test_records_latest_sample() {
        let mut tracker = OrientationTracker::new();
        tracker.activate();
        assert!(tracker.record(&OrientationReading::complete(10.0, 80.0, 5.0)));
        assert!(tracker.record(&OrientationReading::complete(20.0, 85.0, -5.0)));
        assert_eq!(tracker.current(), DeviceOrientation::new(20.0, 85.0, -5.0));
        assert!(tracker.has_sample());
    }

    #[test]
    fn test_incomplete_sample_keeps_previous() {
        let mut tracker = OrientationTracker::new();
        tracker.activate();
        tracker.record(&OrientationReading::complete(10.0, 80.0, 5.0));
        let partial = OrientationReading {
            alpha: Some(99.0),
            beta: None,
            gamma: Some(1.0),
        };
        assert!(!tracker.record(&partial));
        assert_eq!(tracker.current(), DeviceOrientation::new(10.0, 80.0, 5.0));
    }

    #[test]
    fn test_incomplete_first_sample_is_not_a_sample() {
        let mut tracker = OrientationTracker::new();
        tracker.activate();
        tracker.record(&OrientationReading::default());
        assert!(!tracker.has_sample());
    }

    #[test]
    fn test_heading() {
        assert_eq!(DeviceOrientation::new(90.0, 90.0, 0.0).heading(), 270.0);
    }
}
