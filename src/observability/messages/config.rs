// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Configuration document parsed and validated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigurationLoaded<'a> {
    pub endpoint: &'a str,
    pub task_count: usize,
    pub plugin_count: usize,
}

impl Display for ConfigurationLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration loaded: {} tasks, {} plugin sections, model endpoint {}",
            self.task_count, self.plugin_count, self.endpoint
        )
    }
}

impl StructuredLog for ConfigurationLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            endpoint = self.endpoint,
            task_count = self.task_count,
            plugin_count = self.plugin_count,
            "{}", self
        );
    }
}

/// The environment variable named by `model.api_key_env` is unset or empty.
///
/// # Log Level
/// `warn!` - Queries will be sent without a credential
pub struct CredentialEnvMissing<'a> {
    pub variable: &'a str,
}

impl Display for CredentialEnvMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Environment variable '{}' is not set; model queries will carry no credential",
            self.variable
        )
    }
}

impl StructuredLog for CredentialEnvMissing<'_> {
    fn log(&self) {
        tracing::warn!(variable = self.variable, "{}", self);
    }
}
