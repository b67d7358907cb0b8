//! Unified optical input events

use crossterm::event::KeyEvent;

/// One raw device-orientation sample, in degrees.
///
/// Sensors may report any component as missing; consumers decide what an
/// incomplete sample means.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationReading {
    /// Compass heading, increasing counter-clockwise
    pub alpha: Option<f32>,
    /// Front-back tilt (90 = device held upright)
    pub beta: Option<f32>,
    /// Left-right tilt
    pub gamma: Option<f32>,
}

impl OrientationReading {
    /// A sample with every component present
    pub fn complete(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// All three components, if every one was reported
    pub fn angles(&self) -> Option<(f32, f32, f32)> {
        Some((self.alpha?, self.beta?, self.gamma?))
    }
}

/// Unified input event for the optical UI
#[derive(Debug, Clone)]
pub enum OpticalEvent {
    /// Device orientation changed
    Orientation(OrientationReading),

    /// User tapped the element under the reticle
    Select,

    /// Fallback keyboard input
    Key(KeyEvent),

    /// Regular tick for animations
    Tick,

    /// Terminal/window resized
    Resize {
        width: u32,
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_reading() {
        let r = OrientationReading::complete(10.0, 90.0, -5.0);
        assert_eq!(r.angles(), Some((10.0, 90.0, -5.0)));
    }

    #[test]
    fn test_partial_reading_has_no_angles() {
        let r = OrientationReading {
            alpha: Some(10.0),
            beta: None,
            gamma: Some(0.0),
        };
        assert_eq!(r.angles(), None);
        assert_eq!(OrientationReading::default().angles(), None);
    }
}
