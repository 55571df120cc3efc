//! Configuration loading traits and types.
//!
//! An IOC is described by one TOML file: a `[shared]` table naming the IOC,
//! then one `[[controller]]` table per controller and one `[[axis]]` table
//! per axis or sensor channel.
//!
//! # Usage
//!
//! ```rust,no_run
//! use qgate_common::config::{load_description, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let ioc = load_description(Path::new("ioc.toml"))?;
//!     println!("IOC: {}", ioc.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::axis::AxisConfig;
use crate::controller::ControllerConfig;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for the builder.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Fields common to every IOC description.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "BL99P-MO-IOC-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// IOC name, written into the script header.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete IOC description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IocDescription {
    pub shared: SharedConfig,

    /// Controllers in declaration order.
    #[serde(default, rename = "controller")]
    pub controllers: Vec<ControllerConfig>,

    /// Axes and sensor channels in declaration order.
    #[serde(default, rename = "axis")]
    pub axes: Vec<AxisConfig>,
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for every `serde::de::DeserializeOwned` type.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Load an IOC description and validate its `[shared]` table.
///
/// Controller and axis values are not checked here; see [`crate::lint`].
pub fn load_description(path: &Path) -> Result<IocDescription, ConfigError> {
    let description = IocDescription::load(path)?;
    description.shared.validate()?;
    debug!(
        "Loaded {} controllers and {} axes from {}",
        description.controllers.len(),
        description.axes.len(),
        path.display()
    );
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::default().as_filter(), "info");
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        for (text, level) in [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let parsed: TestWrapper = toml::from_str(&format!("level = \"{text}\"")).unwrap();
            assert_eq!(parsed.level, level);
            assert_eq!(level.as_filter(), text);
        }
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = IocDescription::load(Path::new("/nonexistent/path/ioc.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = IocDescription::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_description_success() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[shared]
service_name = "BL99P-MO-IOC-01"

[[controller]]
name = "QG1"
port_address = "/dev/ttyS0"
num_axes = 2

[[axis]]
name = "X"
controller = "QG1"
axis_number = 1

[[axis]]
name = "Y"
controller = "QG1"
axis_number = 2
"#
        )
        .unwrap();
        file.flush().unwrap();

        let ioc = load_description(file.path()).unwrap();
        assert_eq!(ioc.shared.service_name, "BL99P-MO-IOC-01");
        assert_eq!(ioc.shared.log_level, LogLevel::Info);
        assert_eq!(ioc.controllers.len(), 1);
        assert_eq!(ioc.axes.len(), 2);
        assert_eq!(ioc.axes[1].name, "Y");
    }

    #[test]
    fn test_load_description_rejects_empty_service_name() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[shared]\nservice_name = \"\"\n").unwrap();
        file.flush().unwrap();

        let result = load_description(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
