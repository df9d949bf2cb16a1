// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plugin registration and backend connections.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Plugin constructed and registered for the run.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct PluginRegistered<'a> {
    pub plugin_name: &'a str,
}

impl Display for PluginRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Plugin '{}' registered", self.plugin_name)
    }
}

impl StructuredLog for PluginRegistered<'_> {
    fn log(&self) {
        tracing::debug!(plugin_name = self.plugin_name, "{}", self);
    }
}

/// Settings found for a plugin name nobody registered.
///
/// # Log Level
/// `warn!` - Likely a typo in the configuration
pub struct UnknownPluginSettingsIgnored<'a> {
    pub plugin_name: &'a str,
}

impl Display for UnknownPluginSettingsIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring settings for unknown plugin '{}'",
            self.plugin_name
        )
    }
}

impl StructuredLog for UnknownPluginSettingsIgnored<'_> {
    fn log(&self) {
        tracing::warn!(plugin_name = self.plugin_name, "{}", self);
    }
}

/// Plugin opened a connection to its backend.
///
/// # Log Level
/// `debug!`
pub struct PluginConnectionOpened<'a> {
    pub plugin_name: &'a str,
    pub address: &'a str,
}

impl Display for PluginConnectionOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' connected to {}",
            self.plugin_name, self.address
        )
    }
}

impl StructuredLog for PluginConnectionOpened<'_> {
    fn log(&self) {
        tracing::debug!(
            plugin_name = self.plugin_name,
            address = self.address,
            "{}", self
        );
    }
}
