// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Log messages are struct-based types with a `Display` implementation and a
//! [`messages::StructuredLog`] implementation that emits them through
//! `tracing` with their fields attached. This keeps message text out of the
//! call sites and gives every event the same shape.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::config` - configuration loading
//! * `messages::engine` - run lifecycle and output sink problems
//! * `messages::step` - per-step dispatch outcomes
//! * `messages::model` - model query attempts
//! * `messages::plugin` - plugin registration and connections
//!
//! # Usage
//!
//! ```rust
//! use mcp_task_runner::observability::messages::{step::StepFailed, StructuredLog};
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! StepFailed {
//!     index: 2,
//!     kind: "plugin",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
