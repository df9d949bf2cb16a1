// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for individual step dispatch.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Step picked up for dispatch.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct StepStarted<'a> {
    pub index: usize,
    pub raw: &'a str,
}

impl Display for StepStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dispatching step #{}: {}", self.index, self.raw)
    }
}

impl StructuredLog for StepStarted<'_> {
    fn log(&self) {
        tracing::debug!(index = self.index, raw = self.raw, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("step", span_name = name, index = self.index)
    }
}

/// Step produced output.
///
/// # Log Level
/// `debug!` - Results themselves go to the output sink
///
/// # Example
/// ```
/// use mcp_task_runner::observability::messages::step::StepSucceeded;
/// use std::time::Duration;
///
/// let msg = StepSucceeded {
///     index: 0,
///     kind: "model_query",
///     output_size: 8,
///     duration: Duration::from_millis(12),
/// };
///
/// assert!(msg.to_string().starts_with("Step #0 (model_query) succeeded"));
/// ```
pub struct StepSucceeded<'a> {
    pub index: usize,
    pub kind: &'a str,
    pub output_size: usize,
    pub duration: Duration,
}

impl Display for StepSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step #{} ({}) succeeded: output={} bytes, duration={:?}",
            self.index, self.kind, self.output_size, self.duration
        )
    }
}

impl StructuredLog for StepSucceeded<'_> {
    fn log(&self) {
        tracing::debug!(
            index = self.index,
            kind = self.kind,
            output_size = self.output_size,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Step recorded as a failure.
///
/// # Log Level
/// `warn!` - The run continues with the next step
pub struct StepFailed<'a> {
    pub index: usize,
    pub kind: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step #{} failed ({}): {}",
            self.index, self.kind, self.error
        )
    }
}

impl StructuredLog for StepFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            index = self.index,
            kind = self.kind,
            error = %self.error,
            "{}", self
        );
    }
}
