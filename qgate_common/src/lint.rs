//! Advisory configuration checks.
//!
//! The driver is the authority on what it accepts, so descriptors pass every
//! value through unchanged. These checks only report values the driver is
//! likely to reject or misbehave on. Nothing here alters the directives.

use std::collections::HashMap;
use std::fmt;

use crate::axis::AxisConfig;
use crate::registry::ControllerRegistry;

/// A suspicious value in the IOC description.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Fast poll period is not shorter than the slow one.
    PollOrder {
        controller: String,
        fast: f64,
        slow: f64,
    },
    /// A poll period is zero or negative.
    NonPositivePoll {
        controller: String,
        period: f64,
    },
    /// Controller declares zero or a negative number of axes.
    NoAxes { controller: String, num_axes: i64 },
    /// Axis number outside `1..=num_axes`.
    AxisOutOfRange {
        axis: String,
        controller: String,
        axis_number: i64,
        num_axes: i64,
    },
    /// Two axes share a number on one controller.
    DuplicateAxisNumber {
        controller: String,
        axis_number: i64,
        axis_a: String,
        axis_b: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PollOrder {
                controller,
                fast,
                slow,
            } => write!(
                f,
                "controller '{controller}': fast poll {fast}s is not shorter than slow poll {slow}s"
            ),
            Self::NonPositivePoll { controller, period } => {
                write!(f, "controller '{controller}': poll period {period}s is not positive")
            }
            Self::NoAxes {
                controller,
                num_axes,
            } => write!(f, "controller '{controller}': num_axes is {num_axes}"),
            Self::AxisOutOfRange {
                axis,
                controller,
                axis_number,
                num_axes,
            } => write!(
                f,
                "axis '{axis}': number {axis_number} outside 1..={num_axes} of controller '{controller}'"
            ),
            Self::DuplicateAxisNumber {
                controller,
                axis_number,
                axis_a,
                axis_b,
            } => write!(
                f,
                "controller '{controller}': axis number {axis_number} used by '{axis_a}' and '{axis_b}'"
            ),
        }
    }
}

/// Run all checks. Axes whose controller is not registered are skipped;
/// resolution failures are reported by the registry.
pub fn check(registry: &ControllerRegistry, axes: &[AxisConfig]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for ctrl in registry.iter() {
        for period in [ctrl.fast_poll, ctrl.slow_poll] {
            if period <= 0.0 {
                findings.push(Finding::NonPositivePoll {
                    controller: ctrl.name.clone(),
                    period,
                });
            }
        }
        if ctrl.fast_poll >= ctrl.slow_poll {
            findings.push(Finding::PollOrder {
                controller: ctrl.name.clone(),
                fast: ctrl.fast_poll,
                slow: ctrl.slow_poll,
            });
        }
        if ctrl.num_axes <= 0 {
            findings.push(Finding::NoAxes {
                controller: ctrl.name.clone(),
                num_axes: ctrl.num_axes,
            });
        }
    }

    // (controller, axis_number) -> first axis name
    let mut seen: HashMap<(&str, i64), &str> = HashMap::new();
    for axis in axes {
        let Some(ctrl) = registry.get(&axis.controller) else {
            continue;
        };
        if axis.axis_number < 1 || axis.axis_number > ctrl.num_axes {
            findings.push(Finding::AxisOutOfRange {
                axis: axis.name.clone(),
                controller: ctrl.name.clone(),
                axis_number: axis.axis_number,
                num_axes: ctrl.num_axes,
            });
        }
        let key = (ctrl.name.as_str(), axis.axis_number);
        if let Some(first) = seen.get(&key) {
            findings.push(Finding::DuplicateAxisNumber {
                controller: ctrl.name.clone(),
                axis_number: axis.axis_number,
                axis_a: first.to_string(),
                axis_b: axis.name.clone(),
            });
        } else {
            seen.insert(key, axis.name.as_str());
        }
    }

    findings
}
