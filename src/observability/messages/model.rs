// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for model query attempts.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A single attempt failed with a transient error.
///
/// # Log Level
/// `warn!` - The query may still succeed on a later attempt
///
/// # Example
/// ```
/// use mcp_task_runner::observability::messages::model::ModelAttemptFailed;
///
/// let msg = ModelAttemptFailed {
///     model_id: "gpt-4",
///     attempt: 1,
///     max_attempts: 3,
///     cause: "HTTP 503",
/// };
///
/// assert_eq!(msg.to_string(), "Model 'gpt-4' attempt 1/3 failed: HTTP 503");
/// ```
pub struct ModelAttemptFailed<'a> {
    pub model_id: &'a str,
    pub attempt: u32,
    pub max_attempts: u32,
    pub cause: &'a str,
}

impl Display for ModelAttemptFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Model '{}' attempt {}/{} failed: {}",
            self.model_id, self.attempt, self.max_attempts, self.cause
        )
    }
}

impl StructuredLog for ModelAttemptFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            model_id = self.model_id,
            attempt = self.attempt,
            max_attempts = self.max_attempts,
            cause = self.cause,
            "{}", self
        );
    }
}

/// Query answered.
///
/// # Log Level
/// `debug!`
pub struct ModelQueryCompleted<'a> {
    pub model_id: &'a str,
    pub attempts: u32,
    pub output_size: usize,
    pub duration: std::time::Duration,
}

impl Display for ModelQueryCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Model '{}' answered after {} attempt(s): output={} bytes, duration={:?}",
            self.model_id, self.attempts, self.output_size, self.duration
        )
    }
}

impl StructuredLog for ModelQueryCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            model_id = self.model_id,
            attempts = self.attempts,
            output_size = self.output_size,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Query failed terminally.
///
/// # Log Level
/// `warn!` - The step is recorded as failed, the run goes on
pub struct ModelQueryFailed<'a> {
    pub model_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ModelQueryFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Model '{}' query failed: {}", self.model_id, self.error)
    }
}

impl StructuredLog for ModelQueryFailed<'_> {
    fn log(&self) {
        tracing::warn!(model_id = self.model_id, error = %self.error, "{}", self);
    }
}
