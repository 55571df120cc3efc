//! Axis/sensor descriptor.
//!
//! An [`AxisConfig`] names its controller; the reference is resolved through
//! [`crate::registry::ControllerRegistry`] before any directive is produced.
//! Whether the axis registers as a motor or a sensor channel follows the
//! controller's [`ControllerMode`](crate::controller::ControllerMode).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AXIS_TEMPLATE, DEFAULT_AXIS_TIMEOUT_S, DEFAULT_DHLM, DEFAULT_DLLM, DEFAULT_EGU, DEFAULT_MRES,
    DEFAULT_PREC,
};
use crate::controller::ControllerConfig;
use crate::directive::Directive;
use crate::substitution::SubstitutionRow;

fn default_timeout() -> f64 {
    DEFAULT_AXIS_TIMEOUT_S
}

fn default_mres() -> f64 {
    DEFAULT_MRES
}

fn default_dhlm() -> f64 {
    DEFAULT_DHLM
}

fn default_dllm() -> f64 {
    DEFAULT_DLLM
}

fn default_prec() -> u32 {
    DEFAULT_PREC
}

fn default_egu() -> String {
    DEFAULT_EGU.to_string()
}

/// Motor direction written to the DIR field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    #[serde(rename = "Pos", alias = "positive")]
    Positive,
    #[serde(rename = "Neg", alias = "negative")]
    Negative,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("Pos"),
            Self::Negative => f.write_str("Neg"),
        }
    }
}

/// How the driver decides that a commanded move has finished.
///
/// Stored as its integer code (0–4) in TOML and in the axis directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AxisMode {
    /// Controller's own moving flag.
    #[default]
    Native = 0,
    /// Unconfirmed in-position.
    Unconfirmed = 1,
    /// In-position confirmed by the window filter.
    WindowConfirmed = 2,
    /// In-position confirmed by the low-pass filter.
    LpfConfirmed = 3,
    /// Both window and LPF confirmation.
    WindowAndLpfConfirmed = 4,
}

impl AxisMode {
    /// Integer code sent to the driver.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AxisMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Native),
            1 => Ok(Self::Unconfirmed),
            2 => Ok(Self::WindowConfirmed),
            3 => Ok(Self::LpfConfirmed),
            4 => Ok(Self::WindowAndLpfConfirmed),
            other => Err(format!("axis_mode must be 0-4, got {other}")),
        }
    }
}

impl From<AxisMode> for u8 {
    fn from(mode: AxisMode) -> Self {
        mode.code()
    }
}

/// Axis or sensor channel, as declared in `[[axis]]`.
///
/// # TOML Example
///
/// ```toml
/// [[axis]]
/// name = "X1"
/// controller = "QG1"
/// prefix = "BL99P-MO-NPC-01"
/// suffix = ":X"
/// axis_number = 2
/// axis_mode = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Axis name passed to the driver.
    pub name: String,

    /// Name of the owning controller.
    pub controller: String,

    /// Device prefix (template macro `P`).
    #[serde(default, alias = "P")]
    pub prefix: String,

    /// Device suffix (template macro `Q`).
    #[serde(default, alias = "Q")]
    pub suffix: String,

    /// Stage number on the controller, 1-based. Signed like the driver's
    /// iocsh argument.
    #[serde(alias = "axis", alias = "axisNumber")]
    pub axis_number: i64,

    /// Communication timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    #[serde(default, alias = "DIR")]
    pub direction: Direction,

    /// Motion resolution; the template applies it to ERES and RRES as well.
    #[serde(default = "default_mres", alias = "MRES")]
    pub motion_resolution: f64,

    #[serde(default = "default_dhlm", alias = "DHLM")]
    pub dial_high_limit: f64,

    #[serde(default = "default_dllm", alias = "DLLM")]
    pub dial_low_limit: f64,

    #[serde(default = "default_prec", alias = "PREC")]
    pub display_precision: u32,

    #[serde(default = "default_egu", alias = "EGU")]
    pub engineering_units: String,

    /// Moving-indication strategy.
    #[serde(default, alias = "axisMode")]
    pub axis_mode: AxisMode,
}

impl AxisConfig {
    /// Create an axis with default calibration.
    pub fn new(name: impl Into<String>, controller: impl Into<String>, axis_number: i64) -> Self {
        Self {
            name: name.into(),
            controller: controller.into(),
            prefix: String::new(),
            suffix: String::new(),
            axis_number,
            timeout: DEFAULT_AXIS_TIMEOUT_S,
            direction: Direction::Positive,
            motion_resolution: DEFAULT_MRES,
            dial_high_limit: DEFAULT_DHLM,
            dial_low_limit: DEFAULT_DLLM,
            display_precision: DEFAULT_PREC,
            engineering_units: DEFAULT_EGU.to_string(),
            axis_mode: AxisMode::Native,
        }
    }

    /// 0-based index used by the axis template.
    pub fn axis_index(&self) -> i64 {
        self.axis_number.saturating_sub(1)
    }

    /// The `qgateAxisConfig` directive for this axis on `controller`.
    ///
    /// The driver takes the 1-based number, not [`Self::axis_index`].
    pub fn directive(&self, controller: &ControllerConfig) -> Directive {
        Directive::AxisConfig {
            controller: controller.name.clone(),
            axis_number: self.axis_number,
            axis_name: self.name.clone(),
            axis_mode: self.axis_mode,
            kind: controller.mode.axis_kind(),
        }
    }

    /// Row for the axis template.
    pub fn substitution(&self, controller: &ControllerConfig) -> SubstitutionRow {
        SubstitutionRow::new(AXIS_TEMPLATE)
            .with("PORT", &controller.name)
            .with("P", &self.prefix)
            .with("Q", &self.suffix)
            .with("AXIS", self.axis_index())
            .with("TIMEOUT", self.timeout)
            .with("name", &self.name)
            .with("dir", self.direction)
            .with("mres", self.motion_resolution)
            .with("dhlm", self.dial_high_limit)
            .with("dllm", self.dial_low_limit)
            .with("prec", self.display_precision)
            .with("egu", &self.engineering_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerMode;
    use crate::directive::AxisKind;

    fn qg1() -> ControllerConfig {
        ControllerConfig::new("QG1", "/dev/ttyS0", 3)
    }

    #[test]
    fn axis_index_is_number_minus_one() {
        for n in 1..=16 {
            assert_eq!(AxisConfig::new("X", "QG1", n).axis_index(), n - 1);
        }
        assert_eq!(AxisConfig::new("X", "QG1", 0).axis_index(), -1);
        assert_eq!(AxisConfig::new("X", "QG1", -1).axis_index(), -2);
    }

    #[test]
    fn positioner_axis_directive() {
        let axis = AxisConfig::new("X1", "QG1", 2);
        assert_eq!(
            axis.directive(&qg1()).to_string(),
            r#"qgateAxisConfig( "QG1", "2", "X1", 0 )"#
        );
    }

    #[test]
    fn sensor_axis_directive_carries_tag() {
        let mut ctrl = qg1();
        ctrl.mode = ControllerMode::Sensor;
        let axis = AxisConfig::new("X1", "QG1", 2);
        let d = axis.directive(&ctrl);
        assert!(matches!(
            d,
            Directive::AxisConfig {
                kind: AxisKind::Sensor,
                axis_number: 2,
                ..
            }
        ));
        assert_eq!(d.to_string(), r#"qgateAxisConfig( "QG1", "2", "X1", 0, 1 )"#);
    }

    #[test]
    fn substitution_uses_index_not_number() {
        let mut axis = AxisConfig::new("X1", "QG1", 2);
        axis.direction = Direction::Negative;
        axis.prefix = "BL99P".to_string();
        let row = axis.substitution(&qg1());
        assert_eq!(row.template, AXIS_TEMPLATE);
        assert_eq!(row.get("AXIS"), Some("1"));
        assert_eq!(row.get("PORT"), Some("QG1"));
        assert_eq!(row.get("dir"), Some("Neg"));
        assert_eq!(row.get("mres"), Some("0.000001"));
        assert_eq!(row.get("dllm"), Some("-10"));
        assert_eq!(row.get("egu"), Some("um"));
    }

    #[test]
    fn axis_mode_codes_round_trip() {
        for code in 0u8..=4 {
            let mode = AxisMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
        }
        assert!(AxisMode::try_from(5).is_err());
    }

    #[test]
    fn toml_defaults_and_aliases() {
        let axis: AxisConfig = toml::from_str(
            r#"
name = "X1"
controller = "QG1"
axis = 1
DIR = "Neg"
MRES = 0.001
EGU = "nm"
axis_mode = 2
"#,
        )
        .unwrap();
        assert_eq!(axis.axis_number, 1);
        assert_eq!(axis.direction, Direction::Negative);
        assert_eq!(axis.motion_resolution, 0.001);
        assert_eq!(axis.engineering_units, "nm");
        assert_eq!(axis.axis_mode, AxisMode::WindowConfirmed);
        assert_eq!(axis.timeout, DEFAULT_AXIS_TIMEOUT_S);
        assert_eq!(axis.dial_high_limit, DEFAULT_DHLM);
        assert_eq!(axis.display_precision, DEFAULT_PREC);
    }

    #[test]
    fn negative_axis_number_passes_through() {
        let axis: AxisConfig = toml::from_str(
            r#"
name = "X1"
controller = "QG1"
axis_number = -1
"#,
        )
        .unwrap();
        assert_eq!(axis.axis_number, -1);
        assert_eq!(
            axis.directive(&qg1()).to_string(),
            r#"qgateAxisConfig( "QG1", "-1", "X1", 0 )"#
        );
        assert_eq!(axis.substitution(&qg1()).get("AXIS"), Some("-2"));
    }

    #[test]
    fn toml_rejects_unknown_axis_mode() {
        let result = toml::from_str::<AxisConfig>(
            r#"
name = "X1"
controller = "QG1"
axis_number = 1
axis_mode = 7
"#,
        );
        assert!(result.is_err());
    }
}
