// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while loading or validating a configuration document.
///
/// Any of these stops the run before the first step executes.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The YAML (or JSON) document is syntactically invalid or ill-typed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The TOML document is syntactically invalid or ill-typed.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required top-level section is absent.
    #[error("missing required section '{0}'")]
    MissingSection(&'static str),

    /// A required field inside a section is absent or empty.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The model endpoint is not an absolute http(s) URL.
    #[error("invalid model endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A task list entry is not a string.
    #[error("task #{index} must be a string, found {found}")]
    InvalidStep { index: usize, found: &'static str },

    /// A value has the wrong shape for its position in the document.
    #[error("invalid value at '{path}': expected {expected}")]
    InvalidValue { path: String, expected: &'static str },

    /// A plugin could not be constructed from its settings.
    #[error("failed to construct plugin '{plugin_name}': {reason}")]
    PluginConstruction { plugin_name: String, reason: String },

    /// The HTTP client backing the model client could not be created.
    #[error("failed to build model client: {0}")]
    ModelClient(String),
}
