//! arview-app: terminal AR viewer
//!
//! Markers pinned to compass bearings around the viewer, drawn over a
//! simulated camera feed. The view turns with the (simulated) device
//! orientation; tapping the marker under the reticle dismisses it.
//!
//! Controls:
//! - a/d or Left/Right: turn
//! - w/s or Up/Down: tilt
//! - z/x: roll
//! - Space/Enter: dismiss the marker under the reticle
//! - r: reset orientation
//! - ?: toggle key help
//! - Esc or Ctrl+Q: quit

mod handlers;
pub mod sensors;
mod state;
pub mod ui;

use std::time::Duration;

use anyhow::Context;
use arview_core::{Marker, ViewerConfig};
use arview_oui::app::OpticalAppRunner;
use arview_oui::renderer::RenderBackend;
use arview_oui::spatial::Transform;
use arview_oui::{InputSimulator, OpticalApp, OpticalEvent, OrientationReading};
use tracing::{debug, info};

pub use state::AppState;

use handlers::handle_event;
use sensors::{spawn_sensors, SensorHandle, UPRIGHT_SAMPLE};
use ui::render_viewer;

/// The viewer application
pub struct ArViewer {
    config: ViewerConfig,
    markers: Vec<Marker>,
    sensors: Option<SensorHandle>,
}

impl ArViewer {
    pub fn new(config: ViewerConfig, markers: Vec<Marker>, sensors: SensorHandle) -> Self {
        Self {
            config,
            markers,
            sensors: Some(sensors),
        }
    }
}

impl OpticalApp for ArViewer {
    type State = AppState;

    fn init(&mut self) -> Self::State {
        let sensors = self.sensors.take().unwrap_or_else(SensorHandle::detached);
        AppState::new(
            std::mem::take(&mut self.markers),
            sensors,
            self.config.orientation.mode,
            self.config.reticle_degrees,
        )
    }

    fn handle_event(&mut self, event: OpticalEvent, state: &mut Self::State) -> bool {
        handle_event(event, state)
    }

    fn camera(&self, state: &Self::State) -> Transform {
        Transform::from_rotation(state.viewer.camera_rotation())
    }

    fn orientation(&self, state: &Self::State) -> Option<OrientationReading> {
        if !state.viewer.has_orientation() {
            return Some(UPRIGHT_SAMPLE);
        }
        let current = state.viewer.orientation();
        Some(OrientationReading::complete(
            current.alpha,
            current.beta,
            current.gamma,
        ))
    }

    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend) {
        render_viewer(state, backend);
    }

    fn on_tick(&mut self, state: &mut Self::State) {
        state.tick = state.tick.wrapping_add(1);
        let applied = state.drain_sensors();
        if applied > 0 {
            debug!(
                applied,
                tracking = state.viewer.is_tracking(),
                readiness = ?state.viewer.readiness(),
                "sensor updates applied"
            );
        }
    }

    fn on_exit(&mut self, state: &mut Self::State) {
        if state.sensors.has_camera() {
            debug!("releasing camera");
        }
        state.sensors.shutdown();
        state.drain_sensors();
        info!(
            remaining = state.viewer.visibility().len(),
            "viewer closed"
        );
    }
}

/// Start the sensors and run the viewer until the user quits
pub async fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let markers = config
        .build_markers()
        .context("failed to build marker catalog")?;
    info!(markers = markers.len(), "starting viewer");

    let sensors = spawn_sensors(&config);
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let fov = config.fov_degrees;
    let simulator = InputSimulator::new().with_step(config.orientation.step_degrees);

    let app = ArViewer::new(config, markers, sensors);
    let mut runner = OpticalAppRunner::new(app, fov)
        .context("failed to initialize terminal")?
        .with_tick_rate(tick_rate)
        .with_input_simulator(simulator);

    tokio::task::spawn_blocking(move || runner.run())
        .await
        .context("viewer loop panicked")?
        .context("terminal error")?;
    Ok(())
}
