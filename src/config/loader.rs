// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::config::settings::{ModelSettings, OutputSettings, PluginSettings, RuntimeSettings};
use crate::config::validation::{string_map, task_strings, validate_endpoint};
use crate::errors::ConfigError;
use crate::observability::messages::config::{ConfigurationLoaded, CredentialEnvMissing};
use crate::observability::messages::StructuredLog;

/// Validated view of a task runner configuration document.
///
/// Loaded once per run and never mutated afterwards.
///
/// # Example
/// ```yaml
/// context:
///   project: demo
/// model:
///   endpoint: https://models.example.com
///   api_key_env: MODEL_API_KEY
///   allowed_models: [gpt-4]
///   max_retries: 3
/// plugins:
///   redis:
///     host: localhost
///     port: 6379
/// tasks:
///   - "MCP:gpt-4:Say hi"
///   - "PLUGIN:redis.ping"
/// output:
///   format: text
///   verbosity: normal
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub context: BTreeMap<String, String>,
    pub model: ModelSettings,
    pub plugins: BTreeMap<String, PluginSettings>,
    pub tasks: Vec<String>,
    pub output: OutputSettings,
    pub runtime: RuntimeSettings,
}

/// Document shape before validation. Every section is optional here so that
/// missing sections surface as `ConfigError::MissingSection` rather than
/// serde's generic message.
#[derive(Debug, Deserialize)]
struct RawConfig {
    context: Option<BTreeMap<String, Value>>,
    model: Option<RawModelSettings>,
    #[serde(default)]
    plugins: BTreeMap<String, Option<BTreeMap<String, Value>>>,
    tasks: Option<Vec<Value>>,
    #[serde(default)]
    output: OutputSettings,
    #[serde(default)]
    runtime: RuntimeSettings,
}

#[derive(Debug, Deserialize)]
struct RawModelSettings {
    endpoint: Option<String>,
    api_key: Option<String>,
    api_key_env: Option<String>,
    #[serde(default)]
    allowed_models: Vec<String>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    timeout_seconds: Option<u64>,
}

impl Configuration {
    /// Load a configuration from a YAML (or JSON) document.
    pub fn load(raw_document: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(raw_document)?;
        Self::from_raw(raw)
    }

    /// Load a configuration from a TOML document.
    pub fn load_toml(raw_document: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(raw_document)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let context = raw.context.ok_or(ConfigError::MissingSection("context"))?;
        let model = raw.model.ok_or(ConfigError::MissingSection("model"))?;
        let tasks = raw.tasks.ok_or(ConfigError::MissingSection("tasks"))?;

        let context = string_map("context", &context)?;
        let model = Self::model_settings(model)?;
        let tasks = task_strings(&tasks)?;

        let mut plugins = BTreeMap::new();
        for (name, settings) in raw.plugins {
            let flat = match settings {
                Some(map) => string_map(&format!("plugins.{}", name), &map)?,
                None => BTreeMap::new(),
            };
            plugins.insert(name, PluginSettings(flat));
        }

        let config = Self {
            context,
            model,
            plugins,
            tasks,
            output: raw.output,
            runtime: raw.runtime,
        };

        ConfigurationLoaded {
            endpoint: config.model.endpoint.as_str(),
            task_count: config.tasks.len(),
            plugin_count: config.plugins.len(),
        }
        .log();

        Ok(config)
    }

    fn model_settings(raw: RawModelSettings) -> Result<ModelSettings, ConfigError> {
        let endpoint = raw
            .endpoint
            .as_deref()
            .ok_or(ConfigError::MissingField("model.endpoint"))?;
        let endpoint = validate_endpoint(endpoint)?;

        let max_retries = raw.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                path: "model.max_retries".to_string(),
                expected: "an attempt count of at least 1",
            });
        }

        let api_key = match raw.api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(key),
            None => raw.api_key_env.as_deref().and_then(|var| {
                match std::env::var(var) {
                    Ok(value) if !value.is_empty() => Some(value),
                    _ => {
                        CredentialEnvMissing { variable: var }.log();
                        None
                    }
                }
            }),
        };

        Ok(ModelSettings {
            endpoint,
            api_key,
            allowed_models: raw.allowed_models,
            max_retries,
            retry_delay: Duration::from_millis(
                raw.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            ),
            timeout: Duration::from_secs(raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
        })
    }
}

/// Load a configuration file, choosing the format from its extension.
///
/// `.toml` files are parsed as TOML; everything else as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Configuration::load_toml(&content),
        _ => Configuration::load(&content),
    }
}
