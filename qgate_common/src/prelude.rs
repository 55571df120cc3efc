//! Prelude module for common re-exports.
//!
//! ```rust
//! use qgate_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    load_description, ConfigError, ConfigLoader, IocDescription, LogLevel, SharedConfig,
};

// ─── Descriptors ────────────────────────────────────────────────────
pub use crate::axis::{AxisConfig, AxisMode, Direction};
pub use crate::controller::{ControllerConfig, ControllerMode};
pub use crate::registry::{ControllerRegistry, RegistryError};

// ─── Output ─────────────────────────────────────────────────────────
pub use crate::directive::{AxisKind, Directive};
pub use crate::lint::Finding;
pub use crate::plan::{BuildManifest, PlanError, StartupPlan};
pub use crate::substitution::{SubstitutionFile, SubstitutionRow};
