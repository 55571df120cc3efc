//! Defaults and support-module metadata.
//!
//! Single source of truth for descriptor defaults and the names the IOC build
//! needs to link the Queensgate driver.

/// Default polling period while any axis is moving, in seconds.
pub const DEFAULT_FAST_POLL_S: f64 = 1.0;

/// Default polling period while idle, in seconds.
pub const DEFAULT_SLOW_POLL_S: f64 = 5.0;

/// Default pause after starting the TCP-to-serial bridge, in seconds.
pub const DEFAULT_VIRTUAL_WAIT_S: f64 = 5.0;

/// TIMEOUT macro written into the controller template.
pub const CONTROLLER_TEMPLATE_TIMEOUT: u32 = 5;

/// Default axis communication timeout, in seconds.
pub const DEFAULT_AXIS_TIMEOUT_S: f64 = 5.0;

/// Default motion resolution (also applied to ERES and RRES by the template).
pub const DEFAULT_MRES: f64 = 0.000001;

/// Default dial high limit.
pub const DEFAULT_DHLM: f64 = 10.0;

/// Default dial low limit.
pub const DEFAULT_DLLM: f64 = -10.0;

/// Default display precision.
pub const DEFAULT_PREC: u32 = 6;

/// Default engineering units.
pub const DEFAULT_EGU: &str = "um";

/// Controller template file.
pub const CONTROLLER_TEMPLATE: &str = "NPCcontroller.template";

/// Axis template file.
pub const AXIS_TEMPLATE: &str = "NPCaxis.template";

/// Library linked into the IOC.
pub const LIBS: &[&str] = &["queensgateNPC"];

/// DBD files included in the IOC. `systemCommandSupport` provides the
/// `system` shell command used to start the bridge.
pub const DBDS: &[&str] = &["queensgateNPC", "systemCommandSupport"];

/// Support modules the IOC must be built against.
pub const DEPENDENCIES: &[&str] = &["asyn", "motor"];

/// SDK shared object, relative to the directory holding the description file.
pub const DEFAULT_LIB_SUFFIX: &str = "../lib/linux-x86_64/controller_interface64.so";

/// Trailing type tag marking an axis directive as a sensor channel.
pub const SENSOR_AXIS_TAG: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(DEFAULT_FAST_POLL_S < DEFAULT_SLOW_POLL_S);
        assert!(DEFAULT_DLLM < DEFAULT_DHLM);
        assert!(DEFAULT_MRES > 0.0);
        assert!(DBDS.contains(&"systemCommandSupport"));
        assert!(DEFAULT_LIB_SUFFIX.ends_with(".so"));
    }
}
