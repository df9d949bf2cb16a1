// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.

use tracing::Span;

pub mod config;
pub mod engine;
pub mod model;
pub mod plugin;
pub mod step;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with its fields attached.
    fn log(&self);

    /// A span carrying the message's fields, for messages that open a scope.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
