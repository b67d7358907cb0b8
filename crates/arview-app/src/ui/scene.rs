//! Camera feed backdrop and world-anchored markers

use std::f32::consts::TAU;

use arview_core::CameraStatus;
use arview_oui::renderer::{Color, RenderBackend, RenderGlyph};
use arview_oui::spatial::{Point3D, Transform};

use crate::state::AppState;

/// Radius of the ring drawn along the horizon
const HORIZON_RADIUS: f32 = 200.0;
/// Ground plane, below eye level
const GROUND_LEVEL: f32 = -0.8;
const GROUND_RINGS: [f32; 3] = [2.0, 5.0, 12.0];
/// Short segments so partially visible rings still draw
const RING_SEGMENTS: usize = 180;

/// Stand-in for the live camera image: a horizon line and ground rings while
/// streaming, a blank backdrop otherwise
pub fn render_feed(state: &AppState, backend: &mut dyn RenderBackend, camera: &Transform) {
    match state.viewer.camera_status() {
        CameraStatus::Streaming => {
            backend.clear(Color::FEED_BACKGROUND);
            draw_ring(backend, camera, HORIZON_RADIUS, 0.0, Color::HORIZON);
            for radius in GROUND_RINGS {
                draw_ring(backend, camera, radius, GROUND_LEVEL, Color::GROUND);
            }
        }
        CameraStatus::Denied(reason) => {
            backend.clear(Color::Black);
            backend.draw_hud_text(
                0.02,
                0.08,
                &format!("Camera unavailable: {}", reason),
                Color::DarkGrey,
            );
        }
        CameraStatus::Pending | CameraStatus::Released => backend.clear(Color::Black),
    }
}

fn draw_ring(
    backend: &mut dyn RenderBackend,
    camera: &Transform,
    radius: f32,
    height: f32,
    color: Color,
) {
    let point = |i: usize| {
        let angle = i as f32 / RING_SEGMENTS as f32 * TAU;
        Point3D::new(angle.sin() * radius, height, -angle.cos() * radius)
    };
    for i in 0..RING_SEGMENTS {
        backend.draw_line(point(i), point(i + 1), color, camera);
    }
}

/// Visible markers as a glyph plus a "label distance" tag beside it
pub fn render_markers(state: &AppState, backend: &mut dyn RenderBackend, camera: &Transform) {
    let targeted = state.targeted_marker().map(|m| m.id.clone());
    let caps = backend.capabilities();
    let label_offset = 2.0 / caps.width.max(1) as f32;

    for placed in state.viewer.scene().markers {
        let marker = placed.marker;
        let is_target = targeted.as_deref() == Some(marker.id.as_str());
        let symbol = if is_target { "◈" } else { "◆" };

        let glyph = RenderGlyph::new(symbol, placed.position).with_color(marker.color);
        backend.draw_glyph(&glyph, camera);

        if let Some((x, y)) = backend.project(placed.position, camera) {
            let (sx, sy) = ndc_to_hud(x, y);
            let tag = format!("{} {}", marker.label, marker.distance_text());
            backend.draw_hud_text(sx + label_offset, sy, &tag, marker.color);
        }
    }
}

/// Normalized device coordinates (y up) to HUD coordinates (y down)
pub fn ndc_to_hud(x: f32, y: f32) -> (f32, f32) {
    ((x + 1.0) / 2.0, (1.0 - y) / 2.0)
}
