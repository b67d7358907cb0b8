//! Error types for the viewer core

use std::path::PathBuf;

use arview_oui::renderer::ParseColorError;
use thiserror::Error;

use crate::permission::PermissionState;

/// Misuse of the one-shot permission gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("permission was already requested (gate is {0})")]
    AlreadyRequested(PermissionState),

    #[error("no permission request is pending (gate is {0})")]
    NotPending(PermissionState),
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("marker '{id}' has an invalid color: {source}")]
    Color {
        id: String,
        #[source]
        source: ParseColorError,
    },

    #[error("duplicate marker id '{0}'")]
    DuplicateMarker(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
