//! Builder error type.

use qgate_common::config::ConfigError;
use qgate_common::plan::PlanError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the builder from producing its outputs.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Description file could not be loaded.
    #[error("{}: {source}", path.display())]
    Config {
        /// Description file.
        path: PathBuf,
        /// Underlying error.
        source: ConfigError,
    },

    /// Description could not be evaluated.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Writing an output failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output file, or `-` for stdout.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Manifest serialization failed.
    #[error("Failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// `--strict` and the description produced findings.
    #[error("{0} configuration finding(s) in strict mode")]
    Strict(usize),
}
