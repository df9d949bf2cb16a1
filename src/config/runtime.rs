// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::model::RetryingModelClient;
use crate::backends::plugins::PluginFactory;
use crate::config::{Configuration, PluginRegistry};
use crate::engine::DispatchEngine;
use crate::errors::ConfigError;
use crate::traits::ModelClient;

/// Runtime builder - wires the plugin registry and model client from configuration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mcp_task_runner::config::{Configuration, RuntimeBuilder};
/// use mcp_task_runner::engine::EngineState;
///
/// let cfg = Configuration::load(
///     "context: {}\nmodel: {endpoint: 'http://localhost:9000'}\nplugins: {memory: {}}\ntasks: ['PLUGIN:memory.ping']\n",
/// )
/// .unwrap();
///
/// let engine = RuntimeBuilder::from_config(Arc::new(cfg)).unwrap();
///
/// assert_eq!(engine.state(), EngineState::Idle);
/// assert!(engine.plugins().contains_key("memory"));
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a ready-to-run engine using the built-in plugins.
    pub fn from_config(cfg: Arc<Configuration>) -> Result<DispatchEngine, ConfigError> {
        Self::with_factory(cfg, &PluginFactory::builtin())
    }

    /// Build a ready-to-run engine using plugins from `factory`.
    pub fn with_factory(cfg: Arc<Configuration>, factory: &PluginFactory) -> Result<DispatchEngine, ConfigError> {
        let (plugins, model) = Self::parts(&cfg, factory)?;
        Ok(DispatchEngine::new(cfg, plugins, model))
    }

    /// The registry and HTTP model client for `cfg`, for hosts that assemble
    /// the engine themselves.
    pub fn parts(
        cfg: &Configuration,
        factory: &PluginFactory,
    ) -> Result<(PluginRegistry, Arc<dyn ModelClient>), ConfigError> {
        let plugins = PluginRegistry::from_config(cfg, factory)?;
        let model = RetryingModelClient::from_settings(&cfg.model)?;
        Ok((plugins, Arc::new(model)))
    }
}
