// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures surfaced by plugin dispatch and plugin execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// No plugin with this name is registered for the run.
    #[error("unknown plugin '{plugin_name}' (action '{action}')")]
    UnknownPlugin { plugin_name: String, action: String },

    /// The plugin does not recognise the verb. Only raised under the strict policy.
    #[error("plugin '{plugin_name}' does not support action '{action}'")]
    UnknownAction { plugin_name: String, action: String },

    /// The verb is known but its argument is not usable.
    #[error("malformed action '{action}' for plugin '{plugin_name}': {reason}")]
    MalformedAction {
        plugin_name: String,
        action: String,
        reason: String,
    },

    /// The backend behind the plugin failed (connection refused, error reply, ...).
    #[error("plugin '{plugin_name}' failed to execute '{action}': {cause}")]
    Downstream {
        plugin_name: String,
        action: String,
        cause: String,
    },

    /// The plugin's settings are incomplete or ill-typed.
    #[error("invalid settings for plugin '{plugin_name}': {reason}")]
    InvalidSettings { plugin_name: String, reason: String },
}

impl PluginError {
    pub fn downstream(plugin_name: &str, action: &str, cause: impl ToString) -> Self {
        Self::Downstream {
            plugin_name: plugin_name.to_string(),
            action: action.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn malformed(plugin_name: &str, action: &str, reason: impl Into<String>) -> Self {
        Self::MalformedAction {
            plugin_name: plugin_name.to_string(),
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_settings(plugin_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            plugin_name: plugin_name.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the plugin the error is attributed to.
    pub fn plugin_name(&self) -> &str {
        match self {
            PluginError::UnknownPlugin { plugin_name, .. }
            | PluginError::UnknownAction { plugin_name, .. }
            | PluginError::MalformedAction { plugin_name, .. }
            | PluginError::Downstream { plugin_name, .. }
            | PluginError::InvalidSettings { plugin_name, .. } => plugin_name,
        }
    }
}
