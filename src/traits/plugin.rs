use async_trait::async_trait;

use crate::errors::PluginError;

/// Capability implemented by every backend integration.
///
/// A plugin is built once per run from its settings and then receives the
/// opaque action string of every `PLUGIN:<name>.<action>` step addressed to it.
/// Only one step executes at a time, so implementations need not support
/// concurrent callers beyond what `Send + Sync` requires.
#[async_trait]
pub trait Plugin: Send + Sync {
    async fn execute(&self, action: &str) -> Result<String, PluginError>;

    fn name(&self) -> &str;
}
