//! Simulated device sensors
//!
//! Each sensor runs as its own tokio task and reports through an unbounded
//! channel of [`Action`]s. The UI loop is the only reader; it drains the
//! channel once per tick and feeds the viewer state reducer.

use std::time::Duration;

use arview_core::config::{
    CameraMode, GeolocationConfig, GeolocationMode, OrientationConfig, OrientationMode,
    PermissionConfig, PermissionMode,
};
use arview_core::{Action, GeoPosition, PermissionDecision, ViewerConfig};
use arview_oui::OrientationReading;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Sample reported by a device held upright, facing north
pub const UPRIGHT_SAMPLE: OrientationReading = OrientationReading {
    alpha: Some(0.0),
    beta: Some(90.0),
    gamma: Some(0.0),
};

/// Interval between samples in sweep mode
const SWEEP_INTERVAL: Duration = Duration::from_millis(50);

/// A held camera stream. Dropping it stops the stream.
#[derive(Debug)]
pub struct CameraStream {
    action_tx: UnboundedSender<Action>,
}

impl CameraStream {
    /// Ask for the camera once; `None` when access is refused
    pub fn acquire(mode: CameraMode, action_tx: &UnboundedSender<Action>) -> Option<Self> {
        match mode {
            CameraMode::Allow => {
                let _ = action_tx.send(Action::CameraStarted);
                Some(Self {
                    action_tx: action_tx.clone(),
                })
            }
            CameraMode::Deny => {
                let _ = action_tx.send(Action::CameraDenied("camera access denied".to_string()));
                None
            }
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        let _ = self.action_tx.send(Action::CameraReleased);
    }
}

/// Handle the UI holds on the running sensors
pub struct SensorHandle {
    pub action_rx: UnboundedReceiver<Action>,
    camera: Option<CameraStream>,
    tasks: Vec<JoinHandle<()>>,
}

impl SensorHandle {
    /// A handle with no sensors behind it; the channel is already closed
    pub fn detached() -> Self {
        let (_, action_rx) = unbounded_channel();
        Self {
            action_rx,
            camera: None,
            tasks: Vec::new(),
        }
    }

    /// Every action reported since the last call, in arrival order
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    /// Release the camera and stop every sensor task
    pub fn shutdown(&mut self) {
        self.camera.take();
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SensorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Acquire the camera and spawn the permission, geolocation and orientation
/// tasks. Must be called from within a tokio runtime.
pub fn spawn_sensors(config: &ViewerConfig) -> SensorHandle {
    let (action_tx, action_rx) = unbounded_channel();

    let camera = CameraStream::acquire(config.camera.mode, &action_tx);

    let initial_sample = match config.orientation.mode {
        OrientationMode::Keyboard => Some(UPRIGHT_SAMPLE),
        OrientationMode::Sweep | OrientationMode::Absent => None,
    };

    let mut tasks = vec![
        tokio::spawn(request_permission(
            config.permission.clone(),
            initial_sample,
            action_tx.clone(),
        )),
        tokio::spawn(locate_viewer(config.geolocation.clone(), action_tx.clone())),
    ];
    if config.orientation.mode == OrientationMode::Sweep {
        tasks.push(tokio::spawn(sweep_orientation(
            config.orientation.clone(),
            action_tx.clone(),
        )));
    }

    SensorHandle {
        action_rx,
        camera,
        tasks,
    }
}

/// Run the orientation permission flow.
///
/// Once tracking is allowed, `initial_sample` is reported as the first
/// orientation event, the way a real sensor fires as soon as it starts.
pub async fn request_permission(
    config: PermissionConfig,
    initial_sample: Option<OrientationReading>,
    action_tx: UnboundedSender<Action>,
) {
    if config.mode == PermissionMode::NotRequired {
        debug!("orientation permission not required");
        let _ = action_tx.send(Action::PermissionNotRequired);
    } else {
        let _ = action_tx.send(Action::PermissionRequested);
        tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;

        let decision = match config.mode {
            PermissionMode::Grant => PermissionDecision::Granted,
            PermissionMode::Deny => PermissionDecision::Denied,
            PermissionMode::Never | PermissionMode::NotRequired => {
                info!("orientation permission prompt left unanswered");
                futures::future::pending::<()>().await;
                return;
            }
        };
        let _ = action_tx.send(Action::PermissionResolved(decision));
        if decision == PermissionDecision::Denied {
            return;
        }
    }

    if let Some(sample) = initial_sample {
        let _ = action_tx.send(Action::Orientation(sample));
    }
}

/// Single-shot geolocation query
pub async fn locate_viewer(config: GeolocationConfig, action_tx: UnboundedSender<Action>) {
    tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;

    let action = match config.mode {
        GeolocationMode::Fixed {
            latitude,
            longitude,
        } => Action::LocationAcquired(GeoPosition::new(latitude, longitude)),
        GeolocationMode::Unavailable { reason } => Action::LocationFailed(reason),
    };
    let _ = action_tx.send(action);
}

/// Turn slowly clockwise until the receiver goes away
pub async fn sweep_orientation(config: OrientationConfig, action_tx: UnboundedSender<Action>) {
    let step = config.sweep_degrees_per_second * SWEEP_INTERVAL.as_secs_f32();
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    let mut alpha: f32 = 0.0;

    loop {
        interval.tick().await;
        let reading = OrientationReading::complete(alpha, 90.0, 0.0);
        if action_tx.send(Action::Orientation(reading)).is_err() {
            debug!("orientation sweep stopped");
            break;
        }
        // Alpha runs counter-clockwise, so a clockwise turn lowers it
        alpha = (alpha - step).rem_euclid(360.0);
    }
}
