//! # Queensgate IOC Builder Binary
//!
//! Generates the startup script fragment, template substitutions and build
//! manifest for Queensgate NPC/NS controllers in an EPICS IOC.
//!
//! # Usage
//!
//! ```bash
//! # Script to stdout
//! qgate_builder --config etc/ioc.toml
//!
//! # All outputs to files
//! qgate_builder -c etc/ioc.toml -o st.cmd.qgate \
//!     --substitutions db/qgate.substitutions --manifest qgate.json
//!
//! # Refuse suspicious values (poll order, axis range, duplicates)
//! qgate_builder -c etc/ioc.toml --strict -v
//! ```

#![deny(warnings)]

use clap::Parser;
use qgate_builder::{generate, load, Options};
use qgate_common::config::LogLevel;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Queensgate IOC builder - startup directives for NPC/NS controllers
#[derive(Parser, Debug)]
#[command(name = "qgate_builder")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Generates IOC startup directives for Queensgate nanopositioning controllers")]
#[command(long_about = None)]
struct Args {
    /// Path to the IOC description file
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Startup script output (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write template substitutions to this file
    #[arg(long, value_name = "FILE")]
    substitutions: Option<PathBuf>,

    /// Write the JSON build manifest to this file
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Treat configuration findings as errors
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Build failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The description's log level applies unless -v is given, so it has to
    // be read before logging is up.
    let description = load(&args.config);
    let level = description
        .as_ref()
        .map(|d| d.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    info!("Queensgate IOC builder v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Description: {:?}", args.config);
    let description = description?;

    let options = Options {
        config: args.config,
        output: args.output,
        substitutions: args.substitutions,
        manifest: args.manifest,
        strict: args.strict,
    };
    let summary = generate(&options, &description)?;

    info!(
        "Done: {} directives, {} findings",
        summary.directives, summary.findings
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments. Logs go to stderr so the
/// script can be piped from stdout.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
