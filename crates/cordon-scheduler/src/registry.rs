use crate::filter::PluginFactory;
use crate::{plugins, Result, SchedulerError};

/// Name-to-factory table the framework builds plugins from.
///
/// Registration order is preserved and used as the default filter order.
#[derive(Clone, Default)]
pub struct Registry {
    factories: Vec<(String, PluginFactory)>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every in-tree filter plugin
    pub fn in_tree() -> Self {
        let mut registry = Self::new();
        for (name, factory) in plugins::in_tree() {
            registry.factories.push((name.to_string(), factory));
        }
        registry
    }

    /// Add a factory; names must be unique
    pub fn register(&mut self, name: impl Into<String>, factory: PluginFactory) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(SchedulerError::duplicate_plugin(name));
        }
        self.factories.push((name, factory));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<PluginFactory> {
        self.factories
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, factory)| *factory)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::NodeUnschedulable;

    #[test]
    fn test_in_tree_registry_order() {
        let registry = Registry::in_tree();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "NodeUnschedulable",
                "NodeName",
                "NodeSelector",
                "TaintToleration",
                "NodeResourcesFit"
            ]
        );
        assert!(registry.get("NodeUnschedulable").is_some());
        assert!(registry.get("VolumeBinding").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = Registry::in_tree();
        let err = registry
            .register("NodeUnschedulable", NodeUnschedulable::new)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::DuplicatePlugin { .. }));

        registry
            .register("Cordoned", NodeUnschedulable::new)
            .unwrap();
        assert_eq!(registry.names().last(), Some("Cordoned"));
    }
}
