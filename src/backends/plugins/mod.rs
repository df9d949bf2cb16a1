// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in plugins and the factory that constructs them by name.
//!
//! | name      | backend                        | verbs                                        |
//! |-----------|--------------------------------|----------------------------------------------|
//! | `memory`  | in-process key/value cache     | `ping`, `check_connection`, `get`, `set`, `del`, `keys` |
//! | `redis`   | Redis over RESP/TCP            | `ping`, `check_connection`, `get`, `set`, `del` |
//! | `graphql` | GraphQL gateway over HTTP      | `check_connection`, `introspect`, `query`    |
//! | `webhook` | notification webhook over HTTP | `ping`, `check_connection`, `send`           |
//!
//! Actions follow `<verb>` or `<verb>:<argument>`; `set` takes `<key>=<value>`.

pub mod action;
pub mod factory;
pub mod graphql;
pub mod memory;
pub mod redis;
pub mod webhook;

pub use action::Action;
pub use factory::{PluginConstructor, PluginFactory};
pub use graphql::GraphqlPlugin;
pub use memory::MemoryPlugin;
pub use redis::RedisPlugin;
pub use webhook::WebhookPlugin;
