//! # Queensgate IOC Builder
//!
//! Turns an IOC description file into the artifacts the EPICS IOC build
//! consumes:
//!
//! - startup script fragment (`qgateCtrlConfig` / `qgateAxisConfig` and the
//!   optional socat bridge)
//! - `.substitutions` file for the controller and axis templates
//! - JSON build manifest (libs, DBDs, dependencies)
//!
//! # Module Structure
//!
//! - [`error`] - Builder error type
//! - [`script`] - Startup script writer
//! - [`generate`] - Load, evaluate and write in one call

#![deny(missing_docs)]

pub mod error;
pub mod generate;
pub mod script;

pub use crate::error::BuildError;
pub use crate::generate::{generate, load, Options, Summary};
