//! Errors raised while loading or saving configuration files.
//!
//! The simulation itself never fails; only the file-backed layers
//! (settings, tuning, high scores) return these.

use std::fmt;
use std::path::PathBuf;

/// Error loading, saving or validating a configuration file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file contents were not valid JSON for the expected type.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A tuning value is outside the range the simulation can work with.
    InvalidTuning {
        /// Dotted field name, e.g. `asteroids.min_health`.
        field: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to access '{}': {}", path.display(), source)
            }
            ConfigError::Json { path, source } => {
                write!(f, "failed to parse '{}': {}", path.display(), source)
            }
            ConfigError::InvalidTuning {
                field,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is invalid (expected {})",
                field, value, expected
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
            ConfigError::InvalidTuning { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;
