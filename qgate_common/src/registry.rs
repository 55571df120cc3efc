//! Controller registry.
//!
//! Axes refer to their controller by name. The registry is built once from
//! the declared controllers, in declaration order, and is the only place
//! those names are resolved. No global state.

use std::collections::HashMap;

use thiserror::Error;

use crate::axis::AxisConfig;
use crate::controller::ControllerConfig;

/// Controller lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two controllers were declared with the same name.
    #[error("Duplicate controller name: {0}")]
    DuplicateController(String),

    /// An axis names a controller that was never declared.
    #[error("Axis '{axis}' refers to unknown controller '{controller}'")]
    UnresolvedController { axis: String, controller: String },
}

/// Declared controllers, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<ControllerConfig>,
    by_name: HashMap<String, usize>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from controllers in declaration order.
    ///
    /// # Errors
    /// Returns `RegistryError::DuplicateController` on the first repeated name.
    pub fn from_controllers<'a>(
        controllers: impl IntoIterator<Item = &'a ControllerConfig>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for controller in controllers {
            registry.register(controller.clone())?;
        }
        Ok(registry)
    }

    /// Register a controller.
    ///
    /// # Errors
    /// Returns `RegistryError::DuplicateController` if the name is taken.
    pub fn register(&mut self, controller: ControllerConfig) -> Result<(), RegistryError> {
        if self.by_name.contains_key(&controller.name) {
            return Err(RegistryError::DuplicateController(controller.name));
        }
        self.by_name
            .insert(controller.name.clone(), self.controllers.len());
        self.controllers.push(controller);
        Ok(())
    }

    /// Look up a controller by name.
    pub fn get(&self, name: &str) -> Option<&ControllerConfig> {
        self.by_name.get(name).map(|&idx| &self.controllers[idx])
    }

    /// Resolve the controller an axis belongs to.
    ///
    /// # Errors
    /// Returns `RegistryError::UnresolvedController` if it was never declared.
    pub fn resolve(&self, axis: &AxisConfig) -> Result<&ControllerConfig, RegistryError> {
        self.get(&axis.controller)
            .ok_or_else(|| RegistryError::UnresolvedController {
                axis: axis.name.clone(),
                controller: axis.controller.clone(),
            })
    }

    /// Controllers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ControllerConfig> {
        self.controllers.iter()
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// True when no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_register_and_resolve() {
        let mut reg = ControllerRegistry::new();
        reg.register(ControllerConfig::new("QG1", "/dev/ttyS0", 3))
            .unwrap();
        reg.register(ControllerConfig::new("QG2", "/dev/ttyS1", 1))
            .unwrap();

        let axis = AxisConfig::new("X1", "QG2", 1);
        let ctrl = reg.resolve(&axis).expect("should resolve");
        assert_eq!(ctrl.port_address, "/dev/ttyS1");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let ctrls = [
            ControllerConfig::new("B", "/dev/ttyS1", 1),
            ControllerConfig::new("A", "/dev/ttyS0", 1),
        ];
        let reg = ControllerRegistry::from_controllers(&ctrls).unwrap();
        let names: Vec<_> = reg.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn registry_duplicate_name() {
        let ctrls = [
            ControllerConfig::new("QG1", "/dev/ttyS0", 1),
            ControllerConfig::new("QG1", "/dev/ttyS1", 1),
        ];
        let result = ControllerRegistry::from_controllers(&ctrls);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateController("QG1".to_string())
        );
    }

    #[test]
    fn registry_unresolved_controller() {
        let reg = ControllerRegistry::new();
        assert!(reg.is_empty());
        let result = reg.resolve(&AxisConfig::new("X1", "QG9", 1));
        assert!(matches!(
            result,
            Err(RegistryError::UnresolvedController { ref controller, .. }) if controller == "QG9"
        ));
    }
}
