//! Load, evaluate and write in one call.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use qgate_common::config::{load_description, IocDescription};
use qgate_common::plan::StartupPlan;
use tracing::{info, warn};

use crate::error::BuildError;
use crate::script::write_startup_script;

/// Where the builder reads from and writes to.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// IOC description file.
    pub config: PathBuf,
    /// Startup script destination. `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Substitutions file destination. Skipped when `None`.
    pub substitutions: Option<PathBuf>,
    /// Manifest (JSON) destination. Skipped when `None`.
    pub manifest: Option<PathBuf>,
    /// Fail when the description produces findings.
    pub strict: bool,
}

/// What was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of directives written.
    pub directives: usize,
    /// Number of advisory findings.
    pub findings: usize,
}

/// Load the description named by `path`.
pub fn load(path: &Path) -> Result<IocDescription, BuildError> {
    load_description(path).map_err(|source| BuildError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluate `description` (read from `options.config`) and write the outputs.
///
/// Findings are logged at warn level. With `strict` set they abort the run
/// before anything is written.
pub fn generate(options: &Options, description: &IocDescription) -> Result<Summary, BuildError> {
    let plan = StartupPlan::evaluate(description, &options.config)?;

    for finding in &plan.findings {
        warn!("{finding}");
    }
    if options.strict && !plan.findings.is_empty() {
        return Err(BuildError::Strict(plan.findings.len()));
    }

    match &options.output {
        Some(path) => {
            write_file(path, |w| write_startup_script(w, &plan))?;
            info!("Startup script written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_startup_script(&mut lock, &plan)
                .and_then(|_| lock.flush())
                .map_err(|source| BuildError::Io {
                    path: PathBuf::from("-"),
                    source,
                })?;
        }
    }

    if let Some(path) = &options.substitutions {
        write_file(path, |w| write!(w, "{}", plan.substitutions))?;
        info!("Substitutions written to {}", path.display());
    }

    if let Some(path) = &options.manifest {
        let json = serde_json::to_string_pretty(&plan.manifest)?;
        write_file(path, |w| writeln!(w, "{json}"))?;
        info!("Manifest written to {}", path.display());
    }

    Ok(Summary {
        directives: plan.directives.len(),
        findings: plan.findings.len(),
    })
}

fn write_file<F>(path: &Path, body: F) -> Result<(), BuildError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let to_err = |source: io::Error| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_err)?;
    let mut writer = BufWriter::new(file);
    body(&mut writer).map_err(to_err)?;
    writer.flush().map_err(to_err)
}
