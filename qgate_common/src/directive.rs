//! IOC shell directives.
//!
//! Descriptors never print. They return [`Directive`] values, and whoever
//! writes the startup script turns them into text through `Display`. Field
//! order in the rendered text is fixed by the driver's iocsh registration and
//! must not change.

use std::fmt;

use crate::axis::AxisMode;
use crate::consts::SENSOR_AXIS_TAG;

/// What an axis directive registers with the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Motor axis on an NPC controller.
    Motor,
    /// Sensing channel on an NS controller. Appends the trailing type tag.
    Sensor,
}

/// One startup command for the IOC shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Start a detached socat bridge exposing `target` (`host:port`) as the
    /// pseudo-serial device `link`.
    StartBridge { link: String, target: String },

    /// Pause the shell. Crude readiness wait for the bridge.
    Sleep { seconds: f64 },

    /// `qgateCtrlConfig`: create the controller port.
    ControllerConfig {
        name: String,
        port_address: String,
        num_axes: i64,
        fast_poll: f64,
        slow_poll: f64,
        lib_path: String,
    },

    /// `qgateAxisConfig`: attach an axis or sensor channel to a controller.
    AxisConfig {
        controller: String,
        axis_number: i64,
        axis_name: String,
        axis_mode: AxisMode,
        kind: AxisKind,
    },
}

impl Directive {
    /// Comment line to place above this directive, if any.
    pub fn annotation(&self) -> Option<String> {
        match self {
            Self::StartBridge { .. } => {
                Some("# Create virtual port using socat to connect to device".to_string())
            }
            Self::Sleep { seconds } => Some(format!(
                "# Sleep for {seconds} seconds to give socat time to prepare"
            )),
            Self::ControllerConfig { .. } | Self::AxisConfig { .. } => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartBridge { link, target } => {
                write!(f, "system \"socat pty,link={link},raw tcp:{target}&\"")
            }
            Self::Sleep { seconds } => write!(f, "epicsThreadSleep {seconds}"),
            Self::ControllerConfig {
                name,
                port_address,
                num_axes,
                fast_poll,
                slow_poll,
                lib_path,
            } => write!(
                f,
                "qgateCtrlConfig( \"{name}\", \"{port_address}\", \"{num_axes}\", \"{fast_poll}\", \"{slow_poll}\", \"{lib_path}\" )"
            ),
            Self::AxisConfig {
                controller,
                axis_number,
                axis_name,
                axis_mode,
                kind,
            } => {
                write!(
                    f,
                    "qgateAxisConfig( \"{controller}\", \"{axis_number}\", \"{axis_name}\", {}",
                    axis_mode.code()
                )?;
                if *kind == AxisKind::Sensor {
                    write!(f, ", {SENSOR_AXIS_TAG}")?;
                }
                write!(f, " )")
            }
        }
    }
}
