use crate::plugins;
use crate::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One enabled filter plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginSpec {
    /// Registered plugin name
    pub name: String,
    /// Plugin-specific arguments handed to the factory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }
}

/// Configuration for the filter framework
///
/// ```yaml
/// parallelism: 8
/// filters:
///   - name: NodeUnschedulable
///   - name: NodeResourcesFit
///     args:
///       ignoredResources: [memory]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrameworkConfig {
    /// Filters to run, in evaluation order
    #[serde(default = "default_filters")]
    pub filters: Vec<PluginSpec>,
    /// Worker count for concurrent filter passes
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_filters() -> Vec<PluginSpec> {
    plugins::in_tree()
        .into_iter()
        .map(|(name, _)| PluginSpec::new(name))
        .collect()
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
            parallelism: default_parallelism(),
        }
    }
}

impl FrameworkConfig {
    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(data).map_err(|e| {
            SchedulerError::invalid_config(
                e.to_string(),
                "Check the framework configuration against the documented schema",
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SchedulerError::invalid_config(
                format!("Failed to read {}: {}", path.display(), e),
                "Check that the configuration file exists and is readable",
            )
        })?;
        Self::from_yaml_str(&data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(SchedulerError::invalid_config(
                "parallelism must be at least 1",
                "Set parallelism to a positive worker count",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FrameworkConfig::default();
        let names: Vec<_> = config.filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "NodeUnschedulable");
        assert_eq!(names.len(), 5);
        assert!(config.parallelism >= 1);
    }

    #[test]
    fn test_parse_config() {
        let config = FrameworkConfig::from_yaml_str(
            r#"
parallelism: 2
filters:
  - name: NodeUnschedulable
  - name: NodeResourcesFit
    args:
      ignoredResources: [memory]
"#,
        )
        .unwrap();

        assert_eq!(config.parallelism, 2);
        assert_eq!(config.filters.len(), 2);
        assert_eq!(config.filters[0], PluginSpec::new("NodeUnschedulable"));
        assert_eq!(
            config.filters[1].args,
            Some(serde_json::json!({ "ignoredResources": ["memory"] }))
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = FrameworkConfig::from_yaml_str("parallelism: 3").unwrap();
        assert_eq!(config.filters, FrameworkConfig::default().filters);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = FrameworkConfig::from_yaml_str("parallelism: 0").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidConfig { .. }));

        let err = FrameworkConfig::from_yaml_str("plugins: []").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framework.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"filters":[{"name":"TaintToleration"}]}"#)
            .unwrap();

        let config = FrameworkConfig::load(&path).unwrap();
        assert_eq!(config.filters, vec![PluginSpec::new("TaintToleration")]);
    }
}
