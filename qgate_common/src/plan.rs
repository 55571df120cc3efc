//! Whole-IOC evaluation.
//!
//! [`StartupPlan::evaluate`] is a pure function of the description and its
//! path: it resolves every axis against the declared controllers and returns
//! the ordered directives, the template substitutions, advisory findings and
//! the build manifest. Nothing is written anywhere.
//!
//! Ordering: every controller's directives come first, in declaration order,
//! followed by every axis directive in declaration order. An axis therefore
//! always follows its controller.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::IocDescription;
use crate::consts::{AXIS_TEMPLATE, CONTROLLER_TEMPLATE, DBDS, DEPENDENCIES, LIBS};
use crate::directive::Directive;
use crate::lint::{self, Finding};
use crate::registry::{ControllerRegistry, RegistryError};
use crate::substitution::SubstitutionFile;

/// Evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// What the IOC build must link and include for this support module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub libs: Vec<String>,
    pub dbds: Vec<String>,
    pub dependencies: Vec<String>,
    pub templates: Vec<String>,
}

impl Default for BuildManifest {
    fn default() -> Self {
        let owned =
            |names: &[&str]| -> Vec<String> { names.iter().map(|s| s.to_string()).collect() };
        Self {
            libs: owned(LIBS),
            dbds: owned(DBDS),
            dependencies: owned(DEPENDENCIES),
            templates: owned(&[CONTROLLER_TEMPLATE, AXIS_TEMPLATE]),
        }
    }
}

/// Everything the startup script writer needs.
#[derive(Debug, Clone)]
pub struct StartupPlan {
    /// IOC name from `[shared]`.
    pub ioc_name: String,
    /// Directives in execution order.
    pub directives: Vec<Directive>,
    /// Controller and axis template rows.
    pub substitutions: SubstitutionFile,
    /// Advisory findings. Never applied.
    pub findings: Vec<Finding>,
    pub manifest: BuildManifest,
}

impl StartupPlan {
    /// Evaluate `description`, which was read from `description_path`.
    ///
    /// # Errors
    /// - `RegistryError::DuplicateController` for a repeated controller name
    /// - `RegistryError::UnresolvedController` for an axis naming an
    ///   undeclared controller
    pub fn evaluate(
        description: &IocDescription,
        description_path: &Path,
    ) -> Result<Self, PlanError> {
        let registry = ControllerRegistry::from_controllers(&description.controllers)?;

        let mut directives = Vec::new();
        let mut substitutions = SubstitutionFile::new();

        for ctrl in registry.iter() {
            debug!("Controller '{}' ({:?}) on {}", ctrl.name, ctrl.mode, ctrl.port_address);
            directives.extend(ctrl.directives(description_path));
            substitutions.push(ctrl.substitution());
        }

        for axis in &description.axes {
            let ctrl = registry.resolve(axis)?;
            debug!(
                "Axis '{}' -> controller '{}' #{}",
                axis.name, ctrl.name, axis.axis_number
            );
            directives.push(axis.directive(ctrl));
            substitutions.push(axis.substitution(ctrl));
        }

        let findings = lint::check(&registry, &description.axes);

        info!(
            "Planned {} directives for {} controllers and {} axes",
            directives.len(),
            registry.len(),
            description.axes.len()
        );

        Ok(Self {
            ioc_name: description.shared.service_name.clone(),
            directives,
            substitutions,
            findings,
            manifest: BuildManifest::default(),
        })
    }
}
