// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::UnknownActionPolicy;
use crate::errors::PluginError;

/// A plugin action split into `<verb>[:<argument>]`.
///
/// Only the first `:` separates verb from argument; the argument is passed on
/// untouched, so `query:SELECT a::text` has the argument `SELECT a::text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action<'a> {
    pub verb: &'a str,
    pub argument: Option<&'a str>,
}

impl<'a> Action<'a> {
    pub fn parse(action: &'a str) -> Self {
        match action.split_once(':') {
            Some((verb, argument)) => Self {
                verb: verb.trim(),
                argument: Some(argument),
            },
            None => Self {
                verb: action.trim(),
                argument: None,
            },
        }
    }

    /// The argument, which must be present and non-blank.
    pub fn require_argument(&self, plugin_name: &str, action: &str) -> Result<&'a str, PluginError> {
        match self.argument {
            Some(arg) if !arg.trim().is_empty() => Ok(arg),
            _ => Err(PluginError::malformed(
                plugin_name,
                action,
                format!("'{}' needs an argument: {}:<argument>", self.verb, self.verb),
            )),
        }
    }

    /// Split a `<key>=<value>` argument at the first `=`.
    pub fn require_key_value(
        &self,
        plugin_name: &str,
        action: &str,
    ) -> Result<(&'a str, &'a str), PluginError> {
        let argument = self.require_argument(plugin_name, action)?;
        match argument.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
            _ => Err(PluginError::malformed(
                plugin_name,
                action,
                format!("'{}' needs '<key>=<value>'", self.verb),
            )),
        }
    }
}

/// Result for a verb the plugin does not recognise.
pub fn unknown_action(
    plugin_name: &str,
    action: &str,
    policy: UnknownActionPolicy,
) -> Result<String, PluginError> {
    match policy {
        UnknownActionPolicy::Permissive => Ok(format!(
            "unknown action '{}' for plugin '{}'",
            action, plugin_name
        )),
        UnknownActionPolicy::Strict => Err(PluginError::UnknownAction {
            plugin_name: plugin_name.to_string(),
            action: action.to_string(),
        }),
    }
}
