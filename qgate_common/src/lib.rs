//! Queensgate IOC Common Library
//!
//! Typed descriptors for Queensgate nanopositioning controllers (NPC) and
//! nanosensors (NS), and the pure evaluation that turns them into IOC shell
//! directives and template substitutions.
//!
//! # Module Structure
//!
//! - [`config`] - TOML loading and the IOC description file
//! - [`consts`] - Defaults and support-module metadata
//! - [`controller`] - Controller descriptor
//! - [`axis`] - Axis/sensor descriptor
//! - [`directive`] - Directive values and their shell text
//! - [`registry`] - Controller lookup by name
//! - [`substitution`] - Template substitution rows
//! - [`lint`] - Non-fatal configuration findings
//! - [`plan`] - Whole-IOC evaluation
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use qgate_common::config::load_description;
//! use qgate_common::plan::StartupPlan;
//! use std::path::Path;
//!
//! let path = Path::new("ioc.toml");
//! let description = load_description(path).unwrap();
//! let plan = StartupPlan::evaluate(&description, path).unwrap();
//! for directive in &plan.directives {
//!     println!("{directive}");
//! }
//! ```

pub mod axis;
pub mod config;
pub mod consts;
pub mod controller;
pub mod directive;
pub mod lint;
pub mod plan;
pub mod prelude;
pub mod registry;
pub mod substitution;
