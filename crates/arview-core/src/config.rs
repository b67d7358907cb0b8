//! Viewer configuration
//!
//! Loaded from TOML. Every section has defaults, so an empty file (or no
//! file at all) yields a working viewer with the built-in marker catalog.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use arview_oui::renderer::Color;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::geo::GeoPosition;
use crate::marker::{default_catalog, Marker};

/// How the simulated platform handles the orientation permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    /// No prompt; orientation events flow immediately
    NotRequired,
    /// Prompt, and the user grants it
    #[default]
    Grant,
    /// Prompt, and the user refuses
    Deny,
    /// Prompt that is never answered
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    pub mode: PermissionMode,
    /// Simulated time before the prompt is answered
    pub delay_ms: u64,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            mode: PermissionMode::Grant,
            delay_ms: 400,
        }
    }
}

const DEFAULT_LATITUDE: f64 = 51.5007;
const DEFAULT_LONGITUDE: f64 = -0.1246;
const DEFAULT_GEOLOCATION_DELAY_MS: u64 = 800;
const DEFAULT_UNAVAILABLE_REASON: &str = "position unavailable";

/// Outcome of the single geolocation query
#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationMode {
    Fixed { latitude: f64, longitude: f64 },
    Unavailable { reason: String },
}

impl Default for GeolocationMode {
    fn default() -> Self {
        GeolocationMode::Fixed {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeolocationTable", into = "GeolocationTable")]
pub struct GeolocationConfig {
    pub mode: GeolocationMode,
    /// Simulated time before the query answers
    pub delay_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            mode: GeolocationMode::default(),
            delay_ms: DEFAULT_GEOLOCATION_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum GeolocationKind {
    #[default]
    Fixed,
    Unavailable,
}

/// `[geolocation]` as written in the file; any key may be left out
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct GeolocationTable {
    mode: GeolocationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay_ms: Option<u64>,
}

impl TryFrom<GeolocationTable> for GeolocationConfig {
    type Error = String;

    fn try_from(table: GeolocationTable) -> Result<Self, Self::Error> {
        let mode = match table.mode {
            GeolocationKind::Fixed => match (table.latitude, table.longitude) {
                (Some(latitude), Some(longitude)) => GeolocationMode::Fixed {
                    latitude,
                    longitude,
                },
                (None, None) => GeolocationMode::default(),
                _ => {
                    return Err(
                        "fixed geolocation needs both latitude and longitude".to_string()
                    )
                }
            },
            GeolocationKind::Unavailable => GeolocationMode::Unavailable {
                reason: table
                    .reason
                    .unwrap_or_else(|| DEFAULT_UNAVAILABLE_REASON.to_string()),
            },
        };
        Ok(Self {
            mode,
            delay_ms: table.delay_ms.unwrap_or(DEFAULT_GEOLOCATION_DELAY_MS),
        })
    }
}

impl From<GeolocationConfig> for GeolocationTable {
    fn from(config: GeolocationConfig) -> Self {
        let mut table = GeolocationTable {
            delay_ms: Some(config.delay_ms),
            ..GeolocationTable::default()
        };
        match config.mode {
            GeolocationMode::Fixed {
                latitude,
                longitude,
            } => {
                table.latitude = Some(latitude);
                table.longitude = Some(longitude);
            }
            GeolocationMode::Unavailable { reason } => {
                table.mode = GeolocationKind::Unavailable;
                table.reason = Some(reason);
            }
        }
        table
    }
}

/// Whether camera access is granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
}

/// Where orientation samples come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Keyboard-driven simulator
    #[default]
    Keyboard,
    /// Slow continuous turn, for demos
    Sweep,
    /// No sensor: samples never arrive
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub mode: OrientationMode,
    /// Keyboard step per key press
    pub step_degrees: f32,
    /// Turn rate in sweep mode
    pub sweep_degrees_per_second: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            mode: OrientationMode::Keyboard,
            step_degrees: 5.0,
            sweep_degrees_per_second: 12.0,
        }
    }
}

/// One marker entry in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub distance_meters: f32,
    pub bearing_degrees: f32,
    #[serde(default = "default_marker_color")]
    pub color: String,
}

fn default_marker_color() -> String {
    "white".to_string()
}

impl MarkerConfig {
    pub fn to_marker(&self) -> Result<Marker, ConfigError> {
        let color: Color = self.color.parse().map_err(|source| ConfigError::Color {
            id: self.id.clone(),
            source,
        })?;
        let label = if self.label.is_empty() {
            self.id.clone()
        } else {
            self.label.clone()
        };
        Ok(Marker::new(
            self.id.clone(),
            label,
            self.distance_meters,
            self.bearing_degrees,
            color,
        ))
    }
}

impl From<&Marker> for MarkerConfig {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id.clone(),
            label: marker.label.clone(),
            distance_meters: marker.distance_meters,
            bearing_degrees: marker.bearing_degrees,
            color: marker.color.name(),
        }
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Frame interval
    pub tick_rate_ms: u64,
    /// Vertical field of view of the rendered view
    pub fov_degrees: f32,
    /// How far off the line of sight a marker can be and still be tapped
    pub reticle_degrees: f32,
    pub permission: PermissionConfig,
    pub geolocation: GeolocationConfig,
    pub camera: CameraConfig,
    pub orientation: OrientationConfig,
    pub markers: Vec<MarkerConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            fov_degrees: 60.0,
            reticle_degrees: 6.0,
            permission: PermissionConfig::default(),
            geolocation: GeolocationConfig::default(),
            camera: CameraConfig::default(),
            orientation: OrientationConfig::default(),
            markers: default_catalog().iter().map(MarkerConfig::from).collect(),
        }
    }
}

impl ViewerConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        if !(self.fov_degrees > 1.0 && self.fov_degrees < 179.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be between 1 and 179, got {}",
                self.fov_degrees
            )));
        }
        if !(self.reticle_degrees.is_finite() && self.reticle_degrees >= 0.0) {
            return Err(ConfigError::Invalid("reticle_degrees must be non-negative".into()));
        }
        if let GeolocationMode::Fixed { latitude, longitude } = self.geolocation.mode {
            if !GeoPosition::new(latitude, longitude).is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "geolocation {}, {} is out of range",
                    latitude, longitude
                )));
            }
        }

        let mut seen = HashSet::new();
        for marker in &self.markers {
            if !seen.insert(marker.id.as_str()) {
                return Err(ConfigError::DuplicateMarker(marker.id.clone()));
            }
            if !(marker.distance_meters.is_finite() && marker.distance_meters >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "marker '{}' needs a finite, non-negative distance",
                    marker.id
                )));
            }
            if !marker.bearing_degrees.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "marker '{}' needs a finite bearing",
                    marker.id
                )));
            }
            marker.to_marker()?;
        }
        Ok(())
    }

    /// Build the runtime marker catalog
    pub fn build_markers(&self) -> Result<Vec<Marker>, ConfigError> {
        self.markers.iter().map(MarkerConfig::to_marker).collect()
    }
}
