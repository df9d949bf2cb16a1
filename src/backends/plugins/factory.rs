// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use super::graphql::{GraphqlPlugin, GRAPHQL_PLUGIN_NAME};
use super::memory::{MemoryPlugin, MEMORY_PLUGIN_NAME};
use super::redis::{RedisPlugin, REDIS_PLUGIN_NAME};
use super::webhook::{WebhookPlugin, WEBHOOK_PLUGIN_NAME};
use crate::config::{PluginSettings, UnknownActionPolicy};
use crate::errors::PluginError;
use crate::traits::Plugin;

/// Builds a plugin instance from its settings.
pub type PluginConstructor = Arc<
    dyn Fn(&PluginSettings, UnknownActionPolicy) -> Result<Arc<dyn Plugin>, PluginError>
        + Send
        + Sync,
>;

/// Name-keyed table of plugin constructors.
///
/// New integrations are added with [`PluginFactory::register`]; the engine
/// never switches on plugin names itself.
#[derive(Clone, Default)]
pub struct PluginFactory {
    constructors: HashMap<String, PluginConstructor>,
}

impl PluginFactory {
    /// A factory with no constructors registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory with the `memory`, `redis`, `graphql` and `webhook` plugins.
    pub fn builtin() -> Self {
        let mut factory = Self::new();
        factory
            .register(MEMORY_PLUGIN_NAME, |settings, policy| {
                Ok(Arc::new(MemoryPlugin::from_settings(settings, policy)?) as Arc<dyn Plugin>)
            })
            .register(REDIS_PLUGIN_NAME, |settings, policy| {
                Ok(Arc::new(RedisPlugin::from_settings(settings, policy)?) as Arc<dyn Plugin>)
            })
            .register(GRAPHQL_PLUGIN_NAME, |settings, policy| {
                Ok(Arc::new(GraphqlPlugin::from_settings(settings, policy)?) as Arc<dyn Plugin>)
            })
            .register(WEBHOOK_PLUGIN_NAME, |settings, policy| {
                Ok(Arc::new(WebhookPlugin::from_settings(settings, policy)?) as Arc<dyn Plugin>)
            });
        factory
    }

    /// Register (or replace) the constructor for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&PluginSettings, UnknownActionPolicy) -> Result<Arc<dyn Plugin>, PluginError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn create(
        &self,
        name: &str,
        settings: &PluginSettings,
        policy: UnknownActionPolicy,
    ) -> Result<Arc<dyn Plugin>, PluginError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| PluginError::invalid_settings(name, "no plugin registered under this name"))?;
        constructor(settings, policy)
    }
}

impl std::fmt::Debug for PluginFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginFactory")
            .field("plugins", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoPlugin;

    #[async_trait]
    impl Plugin for EchoPlugin {
        async fn execute(&self, action: &str) -> Result<String, PluginError> {
            Ok(action.to_string())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_builtin_names() {
        let factory = PluginFactory::builtin();
        assert_eq!(factory.names(), vec!["graphql", "memory", "redis", "webhook"]);
        assert!(factory.is_registered("redis"));
        assert!(!factory.is_registered("postgres"));
    }

    #[tokio::test]
    async fn test_register_custom_plugin() {
        let mut factory = PluginFactory::new();
        factory.register("echo", |_, _| Ok(Arc::new(EchoPlugin) as Arc<dyn Plugin>));

        let plugin = factory
            .create("echo", &PluginSettings::new(), UnknownActionPolicy::Permissive)
            .unwrap();
        assert_eq!(plugin.execute("say:hello").await.unwrap(), "say:hello");
    }

    #[test]
    fn test_create_propagates_settings_errors() {
        let factory = PluginFactory::builtin();
        let policy = UnknownActionPolicy::Permissive;

        assert!(factory.create("webhook", &PluginSettings::new(), policy).is_err());
        assert!(factory.create("nope", &PluginSettings::new(), policy).is_err());
        assert_eq!(
            factory.create("memory", &PluginSettings::new(), policy).unwrap().name(),
            "memory"
        );
    }
}
