// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::PluginError;

/// Connection and retry settings for the model endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Base URL; queries go to `{endpoint}/v1/models/{model_id}/query`.
    pub endpoint: Url,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    /// When non-empty, only these model identifiers may be queried.
    pub allowed_models: Vec<String>,
    /// Total number of attempts per query, always at least 1.
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

/// Flat key/value settings handed to a plugin constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSettings(pub BTreeMap<String, String>);

impl PluginSettings {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Fetch a required, non-empty setting.
    pub fn require(&self, plugin_name: &str, key: &str) -> Result<&str, PluginError> {
        match self.get(key).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(PluginError::invalid_settings(
                plugin_name,
                format!("missing required setting '{}'", key),
            )),
        }
    }

    /// Parse an optional setting, falling back to `default` when absent.
    pub fn parse_or<T: FromStr>(
        &self,
        plugin_name: &str,
        key: &str,
        default: T,
    ) -> Result<T, PluginError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| {
                PluginError::invalid_settings(
                    plugin_name,
                    format!("setting '{}' has invalid value '{}'", key, raw),
                )
            }),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluginSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How step results are rendered by the console sink.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Only failures are printed by the console sink. Successes are still
    /// reported to the sink and kept in the `RunSummary`.
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Default `tracing` filter directive for this verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// What a plugin does with a verb it does not recognise.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownActionPolicy {
    /// Return a deterministic "unknown action" text as a successful result.
    #[default]
    Permissive,
    /// Fail the step with `PluginError::UnknownAction`.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub unknown_action: UnknownActionPolicy,
}
