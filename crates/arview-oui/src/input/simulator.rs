//! Input simulator for terminal development
//!
//! Maps keyboard input to simulated device-orientation samples so the viewer
//! can be driven without a phone or AR hardware.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::{OpticalEvent, OrientationReading};

/// Beta reported by a device held upright, facing the horizon
const UPRIGHT_BETA: f32 = 90.0;

/// Simulates a device-orientation sensor from keyboard input
pub struct InputSimulator {
    alpha: f32,
    beta: f32,
    gamma: f32,
    /// Degrees per key press
    step: f32,
}

impl Default for InputSimulator {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            beta: UPRIGHT_BETA,
            gamma: 0.0,
            step: 5.0,
        }
    }
}

impl InputSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rotation step in degrees per key press
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Process a keyboard event and generate simulated optical events
    pub fn process_key(&mut self, key: KeyEvent) -> Vec<OpticalEvent> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        match key.code {
            // Turning right lowers alpha: the platform heading runs counter-clockwise
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => self.turn(self.step),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => self.turn(-self.step),
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.tilt(self.step),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.tilt(-self.step),
            KeyCode::Char('z') | KeyCode::Char('Z') => self.roll(-self.step),
            KeyCode::Char('x') | KeyCode::Char('X') => self.roll(self.step),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
                vec![self.orientation_event()]
            }
            KeyCode::Char(' ') | KeyCode::Enter => vec![OpticalEvent::Select],
            _ => vec![OpticalEvent::Key(key)],
        }
    }

    fn turn(&mut self, degrees: f32) -> Vec<OpticalEvent> {
        self.alpha = (self.alpha + degrees).rem_euclid(360.0);
        vec![self.orientation_event()]
    }

    fn tilt(&mut self, degrees: f32) -> Vec<OpticalEvent> {
        self.beta = (self.beta + degrees).clamp(-180.0, 180.0);
        vec![self.orientation_event()]
    }

    fn roll(&mut self, degrees: f32) -> Vec<OpticalEvent> {
        self.gamma = (self.gamma + degrees).clamp(-90.0, 90.0);
        vec![self.orientation_event()]
    }

    fn orientation_event(&self) -> OpticalEvent {
        OpticalEvent::Orientation(self.reading())
    }

    /// Current simulated sensor reading
    pub fn reading(&self) -> OrientationReading {
        OrientationReading::complete(self.alpha, self.beta, self.gamma)
    }

    /// Continue from `reading`, so key presses step from the orientation the
    /// app actually holds. Incomplete readings leave the simulator alone.
    pub fn sync(&mut self, reading: &OrientationReading) {
        if let Some((alpha, beta, gamma)) = reading.angles() {
            self.alpha = alpha;
            self.beta = beta;
            self.gamma = gamma;
        }
    }

    /// Reset simulator to an upright device facing north
    pub fn reset(&mut self) {
        let step = self.step;
        *self = Self { step, ..Self::default() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(sim: &mut InputSimulator, code: KeyCode) -> Vec<OpticalEvent> {
        sim.process_key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn reading_of(events: &[OpticalEvent]) -> OrientationReading {
        match events.first() {
            Some(OpticalEvent::Orientation(r)) => *r,
            other => panic!("Expected Orientation event, got {:?}", other),
        }
    }

    #[test]
    fn test_turn_right_wraps_alpha() {
        let mut sim = InputSimulator::new().with_step(10.0);
        let events = press(&mut sim, KeyCode::Char('d'));
        assert_eq!(reading_of(&events).alpha, Some(350.0));
    }

    #[test]
    fn test_tilt_clamps() {
        let mut sim = InputSimulator::new().with_step(100.0);
        press(&mut sim, KeyCode::Up);
        let events = press(&mut sim, KeyCode::Up);
        assert_eq!(reading_of(&events).beta, Some(180.0));
    }

    #[test]
    fn test_select() {
        let mut sim = InputSimulator::new();
        let events = press(&mut sim, KeyCode::Char(' '));
        assert!(matches!(events.as_slice(), [OpticalEvent::Select]));
    }

    #[test]
    fn test_reset_returns_upright() {
        let mut sim = InputSimulator::new();
        press(&mut sim, KeyCode::Char('a'));
        press(&mut sim, KeyCode::Char('x'));
        let events = press(&mut sim, KeyCode::Char('r'));
        assert_eq!(reading_of(&events), OrientationReading::complete(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_sync_steps_from_given_reading() {
        let mut sim = InputSimulator::new().with_step(10.0);
        press(&mut sim, KeyCode::Char('a'));
        press(&mut sim, KeyCode::Char('a'));

        sim.sync(&OrientationReading::complete(0.0, 90.0, 0.0));
        let events = press(&mut sim, KeyCode::Char('a'));
        assert_eq!(reading_of(&events).alpha, Some(10.0));

        sim.sync(&OrientationReading::default());
        assert_eq!(sim.reading().alpha, Some(10.0));
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut sim = InputSimulator::new();
        let events = press(&mut sim, KeyCode::Char('q'));
        assert!(matches!(events.as_slice(), [OpticalEvent::Key(_)]));
    }
}
