//! Viewer rendering
//!
//! Layers, back to front:
//! - Camera feed backdrop (horizon and ground rings)
//! - Markers anchored in render space
//! - HUD: compass strip, reticle, status line, key help

mod hud;
mod scene;

pub use hud::{cardinal, compass_strip};
pub use scene::ndc_to_hud;

use arview_core::Readiness;
use arview_oui::renderer::RenderBackend;

use crate::state::AppState;

/// Render one frame of the viewer
pub fn render_viewer(state: &AppState, backend: &mut dyn RenderBackend) {
    let camera = *backend.camera();

    scene::render_feed(state, backend, &camera);

    match state.viewer.readiness() {
        Readiness::Ready => {
            scene::render_markers(state, backend, &camera);
            hud::render_reticle(state, backend);
            hud::render_compass(state, backend);
        }
        waiting => hud::render_waiting(waiting, backend),
    }

    hud::render_status(state, backend);
    if state.show_help {
        hud::render_help(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arview_core::config::OrientationMode;
    use arview_core::marker::default_catalog;
    use arview_core::{Action, GeoPosition, PermissionDecision};
    use arview_oui::renderer::terminal::Projection;
    use arview_oui::renderer::{Color, RenderError, RenderGlyph, SurfaceCapabilities};
    use arview_oui::spatial::{Point3D, Transform};
    use arview_oui::OrientationReading;

    use crate::sensors::SensorHandle;

    /// Backend that records draw calls instead of painting a terminal
    struct RecordingBackend {
        projection: Projection,
        camera: Transform,
        cleared_with: Option<Color>,
        glyphs: Vec<RenderGlyph>,
        lines: usize,
        texts: Vec<String>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                projection: Projection::perspective(60.0, 80.0 / (24.0 * 2.0)),
                camera: Transform::identity(),
                cleared_with: None,
                glyphs: Vec::new(),
                lines: 0,
                texts: Vec::new(),
            }
        }

        fn has_text(&self, needle: &str) -> bool {
            self.texts.iter().any(|t| t.contains(needle))
        }
    }

    impl RenderBackend for RecordingBackend {
        fn capabilities(&self) -> SurfaceCapabilities {
            SurfaceCapabilities::default()
        }

        fn begin_frame(&mut self) -> Result<(), RenderError> {
            Ok(())
        }

        fn end_frame(&mut self) -> Result<(), RenderError> {
            Ok(())
        }

        fn clear(&mut self, color: Color) {
            self.cleared_with = Some(color);
        }

        fn draw_glyph(&mut self, glyph: &RenderGlyph, _camera: &Transform) {
            self.glyphs.push(glyph.clone());
        }

        fn draw_line(&mut self, _from: Point3D, _to: Point3D, _color: Color, _camera: &Transform) {
            self.lines += 1;
        }

        fn draw_hud_text(&mut self, _x: f32, _y: f32, text: &str, _color: Color) {
            self.texts.push(text.to_string());
        }

        fn project(&self, point: Point3D, camera: &Transform) -> Option<(f32, f32)> {
            self.projection.project(point, camera).map(|(x, y, _)| (x, y))
        }

        fn camera(&self) -> &Transform {
            &self.camera
        }

        fn set_camera(&mut self, camera: Transform) {
            self.camera = camera;
        }
    }

    fn new_state() -> AppState {
        AppState::new(
            default_catalog(),
            SensorHandle::detached(),
            OrientationMode::Keyboard,
            6.0,
        )
    }

    fn ready_state(alpha: f32) -> AppState {
        let mut state = new_state();
        for action in [
            Action::CameraStarted,
            Action::PermissionRequested,
            Action::PermissionResolved(PermissionDecision::Granted),
            Action::Orientation(OrientationReading::complete(alpha, 90.0, 0.0)),
            Action::LocationAcquired(GeoPosition::new(51.5, -0.12)),
        ] {
            state.viewer.apply(action);
        }
        state
    }

    fn render(state: &AppState) -> RecordingBackend {
        let mut backend = RecordingBackend::new();
        backend.set_camera(Transform::from_rotation(state.viewer.camera_rotation()));
        render_viewer(state, &mut backend);
        backend
    }

    #[test]
    fn test_waiting_for_permission() {
        let backend = render(&new_state());
        assert!(backend.has_text("Waiting for orientation permission"));
        assert!(backend.glyphs.is_empty());
        assert_eq!(backend.cleared_with, Some(Color::Black));
    }

    #[test]
    fn test_locating_viewer() {
        let mut state = new_state();
        state.viewer.apply(Action::PermissionNotRequired);
        state
            .viewer
            .apply(Action::Orientation(OrientationReading::complete(0.0, 90.0, 0.0)));

        let backend = render(&state);
        assert!(backend.has_text("Getting your location"));
        assert!(backend.has_text("locating"));
        assert!(backend.glyphs.is_empty());
    }

    #[test]
    fn test_ready_facing_north() {
        let backend = render(&ready_state(0.0));

        assert_eq!(backend.cleared_with, Some(Color::FEED_BACKGROUND));
        assert!(backend.lines > 0);
        assert_eq!(backend.glyphs.len(), default_catalog().len());

        // North Tower is dead ahead and targeted; the fountain is behind
        assert!(backend.has_text("North Tower 10m"));
        assert!(!backend.has_text("Fountain"));
        assert!(backend.has_text("[+]"));
        assert!(backend.has_text("000° N"));
        assert!(backend
            .glyphs
            .iter()
            .any(|g| g.symbol == "◈" && g.color == Color::Red));
        assert!(!backend.has_text("Waiting"));
    }

    #[test]
    fn test_ready_facing_south() {
        let backend = render(&ready_state(180.0));
        assert!(backend.has_text("Fountain 15m"));
        assert!(!backend.has_text("North Tower"));
        assert!(backend.has_text("180° S"));
    }

    #[test]
    fn test_dismissed_marker_not_drawn() {
        let mut state = ready_state(0.0);
        state
            .viewer
            .apply(Action::MarkerSelected("north-tower".to_string()));

        let backend = render(&state);
        assert_eq!(backend.glyphs.len(), default_catalog().len() - 1);
        assert!(!backend.has_text("North Tower"));
        assert!(backend.has_text("4/5 markers"));
    }

    #[test]
    fn test_camera_denied_blank_feed() {
        let mut state = ready_state(0.0);
        state
            .viewer
            .apply(Action::CameraDenied("camera access denied".to_string()));

        let backend = render(&state);
        assert_eq!(backend.cleared_with, Some(Color::Black));
        assert_eq!(backend.lines, 0);
        assert!(backend.has_text("Camera unavailable"));
    }

    #[test]
    fn test_help_hidden() {
        let mut state = ready_state(0.0);
        state.show_help = false;
        let backend = render(&state);
        assert!(!backend.has_text("esc quit"));
    }

    #[test]
    fn test_ndc_to_hud() {
        assert_eq!(ndc_to_hud(0.0, 0.0), (0.5, 0.5));
        assert_eq!(ndc_to_hud(-1.0, 1.0), (0.0, 0.0));
    }
}
