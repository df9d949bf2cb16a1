// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod plugin_registry;
mod runtime;
mod settings;
mod validation;

pub mod consts;

pub use loader::{load_config, Configuration};
pub use plugin_registry::PluginRegistry;
pub use runtime::RuntimeBuilder;
pub use settings::{
    ModelSettings, OutputFormat, OutputSettings, PluginSettings, RuntimeSettings,
    UnknownActionPolicy, Verbosity,
};
pub use validation::validate_endpoint;
