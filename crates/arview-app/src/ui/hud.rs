//! Screen-fixed overlay: compass, reticle, status and help

use arview_core::Readiness;
use arview_oui::renderer::{Color, RenderBackend};

use crate::state::AppState;

/// Degrees covered by one compass character
const DEGREES_PER_CHAR: f32 = 3.0;
const COMPASS_WIDTH: usize = 41;
const STATUS_COLOR: Color = Color::Rgb(120, 130, 140);
const HELP_COLOR: Color = Color::Rgb(60, 66, 72);

/// Strip of `width` characters centered on `heading`
pub fn compass_strip(heading: f32, width: usize) -> String {
    let center = (width / 2) as f32;
    (0..width)
        .map(|i| {
            let bearing = (heading + (i as f32 - center) * DEGREES_PER_CHAR).rem_euclid(360.0);
            let tick = |every: f32| {
                let off = bearing % every;
                off.min(every - off) < DEGREES_PER_CHAR / 2.0
            };
            if tick(90.0) {
                match ((bearing / 90.0).round() as u32) % 4 {
                    0 => 'N',
                    1 => 'E',
                    2 => 'S',
                    _ => 'W',
                }
            } else if tick(45.0) {
                '+'
            } else if tick(15.0) {
                '|'
            } else {
                '─'
            }
        })
        .collect()
}

/// Eight-point compass name for a heading
pub fn cardinal(heading: f32) -> &'static str {
    const NAMES: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((heading.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    NAMES[index]
}

/// Vertical HUD coordinate of a text row; negative rows count from the bottom
fn row(backend: &dyn RenderBackend, n: i32) -> f32 {
    let height = backend.capabilities().height.max(1) as f32;
    let n = if n < 0 { height + n as f32 } else { n as f32 };
    (n + 0.5) / height
}

/// Horizontal HUD coordinate that centers `text`
fn centered(backend: &dyn RenderBackend, text: &str) -> f32 {
    let width = backend.capabilities().width.max(1) as f32;
    let len = text.chars().count() as f32;
    ((width - len) / 2.0).max(0.0) / width
}

pub fn render_compass(state: &AppState, backend: &mut dyn RenderBackend) {
    let heading = state.viewer.heading();
    let strip = compass_strip(heading, COMPASS_WIDTH);
    let x = centered(backend, &strip);
    let y = row(backend, 0);
    backend.draw_hud_text(x, y, &strip, Color::HUD_CYAN);

    let readout = format!("▼ {:03.0}° {}", heading.round() % 360.0, cardinal(heading));
    let x = centered(backend, &readout);
    let y = row(backend, 1);
    backend.draw_hud_text(x, y, &readout, Color::White);
}

pub fn render_reticle(state: &AppState, backend: &mut dyn RenderBackend) {
    let target = state.targeted_marker();
    let (symbol, color) = match target {
        Some(_) => ("[+]", Color::HUD_CYAN),
        None => ("+", Color::Grey),
    };
    let x = centered(backend, symbol);
    let y = row(backend, (backend.capabilities().height / 2) as i32);
    backend.draw_hud_text(x, y, symbol, color);

    if let Some(marker) = target {
        let hint = format!("{} · space to dismiss", marker.label);
        let x = centered(backend, &hint);
        let y = row(backend, (backend.capabilities().height / 2) as i32 + 2);
        backend.draw_hud_text(x, y, &hint, marker.color);
    }
}

/// Centered readiness message while the scene is withheld
pub fn render_waiting(readiness: Readiness, backend: &mut dyn RenderBackend) {
    let Some(message) = readiness.message() else {
        return;
    };
    let x = centered(backend, message);
    let y = row(backend, (backend.capabilities().height / 2) as i32);
    backend.draw_hud_text(x, y, message, Color::White);
}

pub fn render_status(state: &AppState, backend: &mut dyn RenderBackend) {
    let viewer = &state.viewer;
    let location = match (viewer.location(), viewer.location_error()) {
        (Some(position), _) => position.to_string(),
        (None, Some(error)) => format!("no location: {}", error),
        (None, None) => "locating…".to_string(),
    };
    let status = format!(
        "{}  │  orientation {}  │  {}/{} markers",
        location,
        viewer.permission_state(),
        viewer.visibility().len(),
        viewer.markers().len()
    );
    let y = row(backend, -2);
    backend.draw_hud_text(0.01, y, &status, STATUS_COLOR);

    if let Some(message) = &state.status_message {
        let width = backend.capabilities().width.max(1) as f32;
        let x = 1.0 - (message.chars().count() as f32 + 1.0) / width;
        backend.draw_hud_text(x.max(0.0), y, message, Color::Yellow);
    }
}

pub fn render_help(backend: &mut dyn RenderBackend) {
    let help = "a/d turn  w/s tilt  z/x roll  space select  r reset  ? help  esc quit";
    let y = row(backend, -1);
    backend.draw_hud_text(0.01, y, help, HELP_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_centered_on_heading() {
        let strip = compass_strip(0.0, COMPASS_WIDTH);
        let chars: Vec<char> = strip.chars().collect();
        assert_eq!(chars.len(), COMPASS_WIDTH);
        assert_eq!(chars[20], 'N');
        // 45 degrees either side
        assert_eq!(chars[5], '+');
        assert_eq!(chars[35], '+');
        assert_eq!(chars[15], '|');
        assert_eq!(chars[21], '─');
    }

    #[test]
    fn test_compass_east() {
        let chars: Vec<char> = compass_strip(90.0, COMPASS_WIDTH).chars().collect();
        assert_eq!(chars[20], 'E');
        assert!(!chars.contains(&'N'));
        assert!(!chars.contains(&'S'));
    }

    #[test]
    fn test_compass_wraps_through_north() {
        let chars: Vec<char> = compass_strip(350.0, COMPASS_WIDTH).chars().collect();
        // North sits 10 degrees right of center, a bit over three characters
        let north = chars.iter().position(|&c| c == 'N').unwrap();
        assert!(north == 23 || north == 24);
    }

    #[test]
    fn test_cardinal() {
        assert_eq!(cardinal(0.0), "N");
        assert_eq!(cardinal(359.0), "N");
        assert_eq!(cardinal(44.0), "NE");
        assert_eq!(cardinal(180.0), "S");
        assert_eq!(cardinal(-90.0), "W");
    }
}
