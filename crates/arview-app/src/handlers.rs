//! Viewer event handlers

use arview_core::Action;
use arview_oui::OpticalEvent;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::state::AppState;

/// Handle one event; returns false to quit
pub fn handle_event(event: OpticalEvent, state: &mut AppState) -> bool {
    match event {
        OpticalEvent::Orientation(reading) => {
            if state.accepts_keyboard_orientation() {
                state.viewer.apply(Action::Orientation(reading));
            }
            true
        }
        OpticalEvent::Select => {
            handle_select(state);
            true
        }
        OpticalEvent::Key(key) => handle_key(key, state),
        OpticalEvent::Resize { width, height } => {
            debug!(width, height, "viewport resized");
            true
        }
        OpticalEvent::Tick => true,
    }
}

fn handle_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('?') | KeyCode::Char('h') => state.show_help = !state.show_help,
        _ => {}
    }
    true
}

fn handle_select(state: &mut AppState) {
    let message = match state.select_at_reticle() {
        Some(label) => format!("Dismissed {}", label),
        None if state.viewer.scene().markers.is_empty() => "Nothing to select".to_string(),
        None => "Nothing under the reticle".to_string(),
    };
    state.status_message = Some(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use arview_core::config::OrientationMode;
    use arview_core::marker::default_catalog;
    use arview_core::GeoPosition;
    use arview_oui::OrientationReading;
    use crossterm::event::KeyModifiers;

    use crate::sensors::SensorHandle;

    fn state(mode: OrientationMode) -> AppState {
        let mut state = AppState::new(default_catalog(), SensorHandle::detached(), mode, 6.0);
        state.viewer.apply(Action::PermissionNotRequired);
        state
            .viewer
            .apply(Action::LocationAcquired(GeoPosition::new(10.0, 10.0)));
        state
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> OpticalEvent {
        OpticalEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_keyboard_orientation_reaches_tracker() {
        let mut state = state(OrientationMode::Keyboard);
        let reading = OrientationReading::complete(270.0, 90.0, 0.0);
        assert!(handle_event(OpticalEvent::Orientation(reading), &mut state));
        assert_eq!(state.viewer.orientation().alpha, 270.0);
    }

    #[test]
    fn test_keyboard_orientation_ignored_in_sweep_mode() {
        let mut state = state(OrientationMode::Sweep);
        let reading = OrientationReading::complete(270.0, 90.0, 0.0);
        handle_event(OpticalEvent::Orientation(reading), &mut state);
        assert_eq!(state.viewer.orientation().alpha, 0.0);
        assert!(state.viewer.readiness() != arview_core::Readiness::Ready);
    }

    #[test]
    fn test_select_dismisses_and_reports() {
        let mut state = state(OrientationMode::Keyboard);
        // Face east: alpha 270 puts bearing 90 dead ahead
        let reading = OrientationReading::complete(270.0, 90.0, 0.0);
        handle_event(OpticalEvent::Orientation(reading), &mut state);

        assert!(handle_event(OpticalEvent::Select, &mut state));
        assert_eq!(state.status_message.as_deref(), Some("Dismissed East Gate"));
        assert!(!state.viewer.visibility().is_visible("east-gate"));

        handle_event(OpticalEvent::Select, &mut state);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Nothing under the reticle")
        );
    }

    #[test]
    fn test_select_before_ready() {
        let mut state = state(OrientationMode::Absent);
        handle_event(OpticalEvent::Select, &mut state);
        assert_eq!(state.status_message.as_deref(), Some("Nothing to select"));
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state(OrientationMode::Keyboard);
        assert!(!handle_event(key(KeyCode::Esc, KeyModifiers::NONE), &mut state));
        assert!(handle_event(
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            &mut state
        ));
    }

    #[test]
    fn test_help_toggle() {
        let mut state = state(OrientationMode::Keyboard);
        assert!(state.show_help);
        handle_event(key(KeyCode::Char('?'), KeyModifiers::NONE), &mut state);
        assert!(!state.show_help);
    }
}
