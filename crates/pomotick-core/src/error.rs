//! Core error types for pomotick-core.
//!
//! The timer engine itself never fails: invalid transition requests are
//! no-ops. Errors only exist at the edges -- loading settings, and
//! collaborator calls that the dispatcher absorbs.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomotick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session driver task has stopped
    #[error("timer session has stopped")]
    SessionClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the settings file
    #[error("Failed to access settings file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file contents are not valid TOML for this schema
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Dot-path key does not exist in the settings tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed into the type of the existing key
    #[error("cannot parse '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },

    /// A duration table entry is zero
    #[error("duration for '{0}' must be at least one second")]
    InvalidDuration(String),

    /// Unknown work mode, break mode or cue identifier
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Home directory could not be determined
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Failure of an external collaborator (notification, audio, haptics).
///
/// These are caught by the dispatcher and never reach the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("notification failed: {0}")]
    Notification(String),

    #[error("audio cue failed: {0}")]
    Audio(String),

    #[error("haptic feedback failed: {0}")]
    Haptic(String),

    /// Device lacks the capability or permission entirely
    #[error("{0} unavailable")]
    Unavailable(&'static str),
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
