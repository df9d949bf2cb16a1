// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::plugins::PluginFactory;
use crate::config::Configuration;
use crate::errors::ConfigError;
use crate::observability::messages::plugin::{PluginRegistered, UnknownPluginSettingsIgnored};
use crate::observability::messages::StructuredLog;
use crate::traits::Plugin;

/// Registry mapping plugin names to the instances that serve them for a run.
///
/// Instances are wrapped in `Arc<dyn Plugin>` so the registry can be cloned
/// into several engines without reconstructing backend connections.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use mcp_task_runner::backends::plugins::MemoryPlugin;
/// use mcp_task_runner::config::{PluginRegistry, UnknownActionPolicy};
///
/// let mut registry = PluginRegistry::new();
/// registry.insert("memory", Arc::new(MemoryPlugin::new(UnknownActionPolicy::Permissive)));
///
/// assert!(registry.contains_key("memory"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct PluginRegistry(pub HashMap<String, Arc<dyn Plugin>>);

impl PluginRegistry {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Construct one instance per configured plugin name.
    ///
    /// Names the factory does not know are logged and skipped. A known plugin
    /// whose settings are rejected fails the whole configuration.
    pub fn from_config(cfg: &Configuration, factory: &PluginFactory) -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        for (name, settings) in &cfg.plugins {
            if !factory.is_registered(name) {
                UnknownPluginSettingsIgnored { plugin_name: name }.log();
                continue;
            }

            let plugin = factory
                .create(name, settings, cfg.runtime.unknown_action)
                .map_err(|e| ConfigError::PluginConstruction {
                    plugin_name: name.clone(),
                    reason: e.to_string(),
                })?;

            PluginRegistered { plugin_name: name }.log();
            registry.insert(name.clone(), plugin);
        }

        Ok(registry)
    }

    pub fn insert(&mut self, name: impl Into<String>, plugin: Arc<dyn Plugin>) {
        self.0.insert(name.into(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.0.keys().collect();
        names.sort();
        f.debug_struct("PluginRegistry")
            .field("plugin_count", &self.0.len())
            .field("plugin_names", &names)
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn Plugin>>> for PluginRegistry {
    fn from(map: HashMap<String, Arc<dyn Plugin>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_plugins(plugins_yaml: &str) -> Configuration {
        let yaml = format!(
            "context: {{}}\nmodel: {{endpoint: 'http://localhost:9000'}}\ntasks: []\nplugins:\n{}",
            plugins_yaml
        );
        Configuration::load(&yaml).unwrap()
    }

    #[test]
    fn test_from_config_table_driven() {
        struct TestCase {
            name: &'static str,
            plugins_yaml: &'static str,
            expected_names: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "no plugins",
                plugins_yaml: "  {}\n",
                expected_names: vec![],
            },
            TestCase {
                name: "single memory plugin",
                plugins_yaml: "  memory: {}\n",
                expected_names: vec!["memory"],
            },
            TestCase {
                name: "several built-in plugins",
                plugins_yaml: "  memory: {}\n  redis: {host: localhost, port: 6379}\n  webhook: {url: 'http://hooks.local/notify'}\n",
                expected_names: vec!["memory", "redis", "webhook"],
            },
            TestCase {
                name: "unknown names are skipped",
                plugins_yaml: "  memory: {}\n  mongodb: {host: db}\n",
                expected_names: vec!["memory"],
            },
        ];

        let factory = PluginFactory::builtin();
        for test_case in test_cases {
            let cfg = config_with_plugins(test_case.plugins_yaml);
            let registry = PluginRegistry::from_config(&cfg, &factory).unwrap();

            let mut names: Vec<&str> = registry.names().map(String::as_str).collect();
            names.sort();
            assert_eq!(
                names, test_case.expected_names,
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[test]
    fn test_from_config_rejects_bad_settings() {
        let cfg = config_with_plugins("  redis: {port: not-a-number}\n");
        let err = PluginRegistry::from_config(&cfg, &PluginFactory::builtin()).unwrap_err();
        match err {
            ConfigError::PluginConstruction { plugin_name, .. } => assert_eq!(plugin_name, "redis"),
            other => panic!("expected PluginConstruction, got {:?}", other),
        }
    }

    #[test]
    fn test_from_map_and_emptiness() {
        assert!(PluginRegistry::new().is_empty());

        let mut map: HashMap<String, Arc<dyn Plugin>> = HashMap::new();
        map.insert(
            "memory".to_string(),
            Arc::new(crate::backends::plugins::MemoryPlugin::new(
                crate::config::UnknownActionPolicy::Permissive,
            )),
        );
        let registry = PluginRegistry::from(map);

        assert!(!registry.is_empty());
        assert_eq!(registry.get("memory").map(|p| p.name()), Some("memory"));
    }

    #[test]
    fn test_debug_lists_sorted_names() {
        let cfg = config_with_plugins("  redis: {}\n  memory: {}\n");
        let registry = PluginRegistry::from_config(&cfg, &PluginFactory::builtin()).unwrap();
        let debug = format!("{:?}", registry);
        assert!(debug.contains("plugin_count: 2"));
        assert!(debug.contains(r#"["memory", "redis"]"#));
    }
}
