//! Startup script writer.
//!
//! Serializes a [`StartupPlan`] into iocsh text. Directive order is the
//! plan's order; the writer only adds the header and the annotation comments.

use std::io::{self, Write};

use qgate_common::plan::StartupPlan;

/// Write the startup script fragment for `plan`.
pub fn write_startup_script<W: Write>(out: &mut W, plan: &StartupPlan) -> io::Result<()> {
    writeln!(out, "# Queensgate controllers for {}", plan.ioc_name)?;
    writeln!(
        out,
        "# Generated by qgate_builder {}",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    for directive in &plan.directives {
        if let Some(note) = directive.annotation() {
            writeln!(out, "{note}")?;
        }
        writeln!(out, "{directive}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgate_common::axis::AxisConfig;
    use qgate_common::config::{IocDescription, LogLevel, SharedConfig};
    use qgate_common::controller::ControllerConfig;
    use std::path::Path;

    fn plan(virtual_port: &str) -> StartupPlan {
        let mut ctrl = ControllerConfig::new("QG1", "/tmp/qgate1", 1);
        ctrl.lib_path = "/opt/lib.so".to_string();
        ctrl.virtual_port = virtual_port.to_string();
        let description = IocDescription {
            shared: SharedConfig {
                log_level: LogLevel::Info,
                service_name: "TEST-IOC".to_string(),
            },
            controllers: vec![ctrl],
            axes: vec![AxisConfig::new("X", "QG1", 1)],
        };
        StartupPlan::evaluate(&description, Path::new("ioc.toml")).unwrap()
    }

    fn render(plan: &StartupPlan) -> String {
        let mut buf = Vec::new();
        write_startup_script(&mut buf, plan).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn serial_script_body() {
        let text = render(&plan(""));
        let body: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(
            body,
            [
                r#"qgateCtrlConfig( "QG1", "/tmp/qgate1", "1", "1", "5", "/opt/lib.so" )"#,
                r#"qgateAxisConfig( "QG1", "1", "X", 0 )"#,
            ]
        );
        assert!(text.starts_with("# Queensgate controllers for TEST-IOC\n"));
    }

    #[test]
    fn bridged_script_has_annotations() {
        let text = render(&plan("10.0.0.1:7009"));
        let body: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(body.len(), 6);
        assert_eq!(body[0], "# Create virtual port using socat to connect to device");
        assert_eq!(body[1], r#"system "socat pty,link=/tmp/qgate1,raw tcp:10.0.0.1:7009&""#);
        assert_eq!(body[2], "# Sleep for 5 seconds to give socat time to prepare");
        assert_eq!(body[3], "epicsThreadSleep 5");
    }
}
