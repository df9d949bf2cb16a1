// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::fmt;

/// Outcome of a single failed attempt, classified for the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Network failure, timeout, rate limit or server error. Worth retrying.
    Transient(String),
    /// Non-retryable status such as a malformed request.
    Rejected { status: u16, body: String },
    /// A success status whose body lacks the designated output field.
    Malformed(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Transient(cause) => write!(f, "transient failure: {}", cause),
            AttemptError::Rejected { status, body } => {
                write!(f, "rejected with status {}: {}", status, body)
            }
            AttemptError::Malformed(cause) => write!(f, "malformed response: {}", cause),
        }
    }
}

/// Performs exactly one model query attempt.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn send(&self, model_id: &str, prompt: &str) -> Result<String, AttemptError>;
}
