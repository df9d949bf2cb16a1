// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error taxonomy for the task runner.
//!
//! Only [`ConfigError`] is fatal. Every other error is caught at the step
//! boundary by the dispatch engine and recorded as a failed execution result.

mod config;
mod model;
mod parse;
mod plugin;

pub use config::ConfigError;
pub use model::ModelQueryError;
pub use parse::ParseError;
pub use plugin::PluginError;
