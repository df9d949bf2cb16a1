// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start and completion
//! * Runs aborted by a configuration failure
//! * Output sink write problems

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use mcp_task_runner::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     step_count: 3,
///     plugin_count: 2,
/// };
///
/// assert_eq!(msg.to_string(), "Starting run: 3 steps, 2 plugins registered");
/// ```
pub struct RunStarted {
    pub step_count: usize,
    pub plugin_count: usize,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting run: {} steps, {} plugins registered",
            self.step_count, self.plugin_count
        )
    }
}

impl StructuredLog for RunStarted {
    fn log(&self) {
        tracing::info!(
            step_count = self.step_count,
            plugin_count = self.plugin_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            step_count = self.step_count,
            plugin_count = self.plugin_count,
        )
    }
}

/// Run walked every step.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use mcp_task_runner::observability::messages::engine::RunCompleted;
/// use std::time::Duration;
///
/// let msg = RunCompleted {
///     step_count: 3,
///     succeeded: 2,
///     failed: 1,
///     duration: Duration::from_millis(150),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunCompleted {
    pub step_count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run completed: {} steps ({} succeeded, {} failed) in {:?}",
            self.step_count, self.succeeded, self.failed, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            step_count = self.step_count,
            succeeded = self.succeeded,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Configuration was rejected so no step ran.
///
/// # Log Level
/// `error!` - The run is over before it started
pub struct RunAborted<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for RunAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Run aborted, configuration rejected: {}", self.error)
    }
}

impl StructuredLog for RunAborted<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }
}

/// The output sink could not record a result.
///
/// # Log Level
/// `warn!` - The run continues
pub struct SinkWriteFailed<'a> {
    pub index: usize,
    pub error: &'a std::io::Error,
}

impl Display for SinkWriteFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to report result of step #{}: {}",
            self.index, self.error
        )
    }
}

impl StructuredLog for SinkWriteFailed<'_> {
    fn log(&self) {
        tracing::warn!(index = self.index, error = %self.error, "{}", self);
    }
}
