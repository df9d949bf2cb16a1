// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backend implementations behind the engine's two seams.
//!
//! # Available Backends
//!
//! ## Model
//! [`model::RetryingModelClient`] implements [`crate::traits::ModelClient`] over
//! an HTTP endpoint with bounded retry.
//!
//! ## Plugins
//! [`plugins::PluginFactory`] builds [`crate::traits::Plugin`] instances by
//! name: an in-process cache, Redis, a GraphQL gateway and a notification
//! webhook.
//!
//! ## Stub Backend (Test-Only)
//! Fixed-reply plugins and model clients for engine tests. Not available in
//! production builds.
//!
//! # Example
//! ```rust
//! use mcp_task_runner::backends::plugins::PluginFactory;
//! use mcp_task_runner::config::{PluginSettings, UnknownActionPolicy};
//!
//! let factory = PluginFactory::builtin();
//! let plugin = factory.create("memory", &PluginSettings::new(), UnknownActionPolicy::Permissive)?;
//! assert_eq!(plugin.name(), "memory");
//! # Ok::<(), mcp_task_runner::errors::PluginError>(())
//! ```

pub mod model;
pub mod plugins;
#[cfg(test)]
pub mod stub;
