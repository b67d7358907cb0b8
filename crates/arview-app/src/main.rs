//! arview: terminal AR viewer
//!
//! Usage:
//!   arview                          # built-in markers, keyboard orientation
//!   arview --config viewer.toml     # markers and sensors from a file
//!   arview --permission deny        # orientation permission refused
//!   arview --sweep --no-location    # slow automatic turn, no location fix
//!   arview --print-config           # dump the effective config as TOML

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use arview_core::config::{CameraMode, GeolocationMode, OrientationMode, PermissionMode};
use arview_core::ViewerConfig;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PermissionArg {
    /// No prompt; orientation flows immediately
    NotRequired,
    /// Prompt and grant
    Grant,
    /// Prompt and refuse
    Deny,
    /// Prompt that is never answered
    Never,
}

impl From<PermissionArg> for PermissionMode {
    fn from(arg: PermissionArg) -> Self {
        match arg {
            PermissionArg::NotRequired => PermissionMode::NotRequired,
            PermissionArg::Grant => PermissionMode::Grant,
            PermissionArg::Deny => PermissionMode::Deny,
            PermissionArg::Never => PermissionMode::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "arview")]
#[command(about = "Terminal AR viewer: markers pinned to compass bearings around you")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// How the orientation permission prompt is answered
    #[arg(long, value_enum)]
    permission: Option<PermissionArg>,

    /// Fixed viewer location as "lat,lon"
    #[arg(long, value_name = "LAT,LON", conflicts_with = "no_location")]
    location: Option<String>,

    /// Simulate a failed geolocation query
    #[arg(long)]
    no_location: bool,

    /// Simulate refused camera access
    #[arg(long)]
    deny_camera: bool,

    /// Turn automatically instead of reading the keyboard
    #[arg(long)]
    sweep: bool,

    /// Write logs here (the terminal is taken over by the viewer)
    #[arg(long, default_value = "arview.log")]
    log_file: PathBuf,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Load the config file, if any, and layer the flags on top
    fn resolve_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ViewerConfig::default(),
        };

        if let Some(permission) = self.permission {
            config.permission.mode = permission.into();
        }
        if let Some(location) = &self.location {
            let (latitude, longitude) = parse_location(location)?;
            config.geolocation.mode = GeolocationMode::Fixed {
                latitude,
                longitude,
            };
        }
        if self.no_location {
            config.geolocation.mode = GeolocationMode::Unavailable {
                reason: "position unavailable".to_string(),
            };
        }
        if self.deny_camera {
            config.camera.mode = CameraMode::Deny;
        }
        if self.sweep {
            config.orientation.mode = OrientationMode::Sweep;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn parse_location(value: &str) -> Result<(f64, f64)> {
    let Some((lat, lon)) = value.split_once(',') else {
        bail!("expected LAT,LON, got '{}'", value);
    };
    let latitude = lat
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude '{}'", lat.trim()))?;
    let longitude = lon
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude '{}'", lon.trim()))?;
    Ok((latitude, longitude))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(&cli.log_file)?;
    info!(
        permission = ?config.permission.mode,
        orientation = ?config.orientation.mode,
        "configuration resolved"
    );

    arview_app::run(config).await
}
