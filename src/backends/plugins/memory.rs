// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::action::{unknown_action, Action};
use crate::config::{PluginSettings, UnknownActionPolicy};
use crate::errors::PluginError;
use crate::traits::Plugin;

pub const MEMORY_PLUGIN_NAME: &str = "memory";

/// In-process key/value cache living for the duration of a run.
///
/// Replies mirror Redis wording (`PONG`, `OK`, `(nil)`, deletion counts) so
/// task lists can switch between the two without changing expectations.
pub struct MemoryPlugin {
    entries: Mutex<BTreeMap<String, String>>,
    policy: UnknownActionPolicy,
}

impl MemoryPlugin {
    pub fn new(policy: UnknownActionPolicy) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            policy,
        }
    }

    /// Settings prefixed with `seed.` are preloaded as entries.
    pub fn from_settings(
        settings: &PluginSettings,
        policy: UnknownActionPolicy,
    ) -> Result<Self, PluginError> {
        let seeded = settings
            .0
            .iter()
            .filter_map(|(k, v)| k.strip_prefix("seed.").map(|key| (key.to_string(), v.clone())))
            .collect();
        Ok(Self {
            entries: Mutex::new(seeded),
            policy,
        })
    }
}

#[async_trait]
impl Plugin for MemoryPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        let parsed = Action::parse(action);
        let mut entries = self.entries.lock().await;

        match parsed.verb {
            "ping" => Ok("PONG".to_string()),
            "check_connection" => Ok("OK".to_string()),
            "get" => {
                let key = parsed.require_argument(self.name(), action)?;
                Ok(entries
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| "(nil)".to_string()))
            }
            "set" => {
                let (key, value) = parsed.require_key_value(self.name(), action)?;
                entries.insert(key.to_string(), value.to_string());
                Ok("OK".to_string())
            }
            "del" => {
                let key = parsed.require_argument(self.name(), action)?;
                let removed = entries.remove(key).is_some();
                Ok(if removed { "1" } else { "0" }.to_string())
            }
            "keys" => Ok(entries.keys().cloned().collect::<Vec<_>>().join(",")),
            _ => unknown_action(self.name(), action, self.policy),
        }
    }

    fn name(&self) -> &str {
        MEMORY_PLUGIN_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_key_value_lifecycle() {
        let plugin = MemoryPlugin::new(UnknownActionPolicy::Permissive);

        let steps = vec![
            ("ping", "PONG"),
            ("get:greeting", "(nil)"),
            ("set:greeting=hello=world", "OK"),
            ("get:greeting", "hello=world"),
            ("set:other=1", "OK"),
            ("keys", "greeting,other"),
            ("del:greeting", "1"),
            ("del:greeting", "0"),
            ("get:greeting", "(nil)"),
        ];

        for (action, expected) in steps {
            assert_eq!(plugin.execute(action).await.unwrap(), expected, "action '{}'", action);
        }
    }

    #[tokio::test]
    async fn test_seeded_entries() {
        let settings: PluginSettings = [("seed.user", "ada"), ("ignored", "x")].into_iter().collect();
        let plugin = MemoryPlugin::from_settings(&settings, UnknownActionPolicy::Permissive).unwrap();

        assert_eq!(plugin.execute("get:user").await.unwrap(), "ada");
        assert_eq!(plugin.execute("keys").await.unwrap(), "user");
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_actions() {
        let permissive = MemoryPlugin::new(UnknownActionPolicy::Permissive);
        assert!(matches!(
            permissive.execute("set:missing-equals").await,
            Err(PluginError::MalformedAction { .. })
        ));
        assert_eq!(
            permissive.execute("flushall").await.unwrap(),
            "unknown action 'flushall' for plugin 'memory'"
        );

        let strict = MemoryPlugin::new(UnknownActionPolicy::Strict);
        assert!(matches!(
            strict.execute("flushall").await,
            Err(PluginError::UnknownAction { .. })
        ));
    }
}
