//! Controller descriptor.
//!
//! One [`ControllerConfig`] per physical channel to a Queensgate controller,
//! either a real serial device or a pseudo-serial device bridged to TCP with
//! socat. Values are taken as given: poll periods and axis counts are passed
//! through to the driver uninterpreted (see [`crate::lint`] for advisory checks).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    CONTROLLER_TEMPLATE, CONTROLLER_TEMPLATE_TIMEOUT, DEFAULT_FAST_POLL_S, DEFAULT_LIB_SUFFIX,
    DEFAULT_SLOW_POLL_S, DEFAULT_VIRTUAL_WAIT_S,
};
use crate::directive::{AxisKind, Directive};
use crate::substitution::SubstitutionRow;

fn default_fast_poll() -> f64 {
    DEFAULT_FAST_POLL_S
}

fn default_slow_poll() -> f64 {
    DEFAULT_SLOW_POLL_S
}

fn default_virtual_wait() -> f64 {
    DEFAULT_VIRTUAL_WAIT_S
}

/// Which kind of device sits behind the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControllerMode {
    /// NPC nanopositioner. Axes register as motors.
    #[default]
    #[serde(alias = "NPC", alias = "npc")]
    Positioner,
    /// NS nanosensor. Axes register as sensor channels.
    #[serde(alias = "NS", alias = "ns")]
    Sensor,
}

impl ControllerMode {
    /// Axis directive variant used by axes on this controller.
    pub fn axis_kind(self) -> AxisKind {
        match self {
            Self::Positioner => AxisKind::Motor,
            Self::Sensor => AxisKind::Sensor,
        }
    }
}

/// Queensgate controller, as declared in `[[controller]]`.
///
/// # TOML Example
///
/// ```toml
/// [[controller]]
/// name = "QG1"
/// prefix = "BL99P-MO-NPC-01"
/// port_address = "/tmp/qgate1"
/// virtual_port = "172.23.112.6:7017"
/// num_axes = 3
/// fast_poll = 0.5
/// slow_poll = 1.7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Asyn port name created by the driver. Unique per IOC.
    pub name: String,

    /// Device prefix (template macro `P`).
    #[serde(default, alias = "P")]
    pub prefix: String,

    /// Device suffix (template macro `Q`).
    #[serde(default, alias = "Q")]
    pub suffix: String,

    /// Serial device path or alias, e.g. `/dev/ttyS0`. With a virtual port
    /// this is the link name socat creates.
    #[serde(alias = "portAddress")]
    pub port_address: String,

    /// Remote `host:port` to bridge to `port_address`. Empty means a real
    /// serial device.
    #[serde(default, alias = "virtualPort")]
    pub virtual_port: String,

    /// Seconds to wait after starting the bridge.
    #[serde(default = "default_virtual_wait", alias = "virtualWait")]
    pub virtual_wait: f64,

    /// Number of axes configured on the controller. Signed like the
    /// driver's iocsh argument so bad values reach the driver unchanged.
    #[serde(alias = "numAxes")]
    pub num_axes: i64,

    /// Poll period while moving, in seconds.
    #[serde(default = "default_fast_poll", alias = "fastPoll")]
    pub fast_poll: f64,

    /// Poll period while idle, in seconds.
    #[serde(default = "default_slow_poll", alias = "slowPoll")]
    pub slow_poll: f64,

    /// Queensgate SDK shared library. Empty selects the default location
    /// next to the description file.
    #[serde(default, alias = "libPath")]
    pub lib_path: String,

    /// Positioner (NPC) or sensor (NS).
    #[serde(default)]
    pub mode: ControllerMode,
}

impl ControllerConfig {
    /// Create a positioner controller with default poll periods.
    pub fn new(name: impl Into<String>, port_address: impl Into<String>, num_axes: i64) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            suffix: String::new(),
            port_address: port_address.into(),
            virtual_port: String::new(),
            virtual_wait: DEFAULT_VIRTUAL_WAIT_S,
            num_axes,
            fast_poll: DEFAULT_FAST_POLL_S,
            slow_poll: DEFAULT_SLOW_POLL_S,
            lib_path: String::new(),
            mode: ControllerMode::Positioner,
        }
    }

    /// True when the device is reached through a TCP-to-serial bridge.
    pub fn is_bridged(&self) -> bool {
        !self.virtual_port.is_empty()
    }

    /// SDK library path embedded in the controller directive.
    ///
    /// An explicit `lib_path` is returned as is. Otherwise the path is
    /// [`DEFAULT_LIB_SUFFIX`] joined to the directory containing
    /// `description`, made absolute against the working directory so the
    /// IOC can boot from anywhere. No filesystem access is made.
    pub fn resolve_lib_path(&self, description: &Path) -> String {
        if !self.lib_path.is_empty() {
            return self.lib_path.clone();
        }
        let description = std::path::absolute(description)
            .unwrap_or_else(|_| description.to_path_buf());
        let base = description.parent().unwrap_or_else(|| Path::new(""));
        base.join(DEFAULT_LIB_SUFFIX).display().to_string()
    }

    /// Directives that bring this controller up, in execution order.
    ///
    /// Bridged controllers get the socat start and a sleep of
    /// `virtual_wait` seconds before `qgateCtrlConfig`; the driver must not
    /// open the port before the bridge exists.
    pub fn directives(&self, description: &Path) -> Vec<Directive> {
        let mut out = Vec::with_capacity(3);
        if self.is_bridged() {
            debug!(
                "Controller '{}' bridged: {} <-> tcp:{}",
                self.name, self.port_address, self.virtual_port
            );
            out.push(Directive::StartBridge {
                link: self.port_address.clone(),
                target: self.virtual_port.clone(),
            });
            out.push(Directive::Sleep {
                seconds: self.virtual_wait,
            });
        }
        out.push(Directive::ControllerConfig {
            name: self.name.clone(),
            port_address: self.port_address.clone(),
            num_axes: self.num_axes,
            fast_poll: self.fast_poll,
            slow_poll: self.slow_poll,
            lib_path: self.resolve_lib_path(description),
        });
        out
    }

    /// Row for the controller template.
    pub fn substitution(&self) -> SubstitutionRow {
        SubstitutionRow::new(CONTROLLER_TEMPLATE)
            .with("PORT", &self.name)
            .with("P", &self.prefix)
            .with("Q", &self.suffix)
            .with("TIMEOUT", CONTROLLER_TEMPLATE_TIMEOUT)
            .with("name", &self.name)
    }
}
