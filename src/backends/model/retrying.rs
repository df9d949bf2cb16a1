// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::time::{Duration, Instant};

use super::http::HttpTransport;
use super::transport::{AttemptError, ModelTransport};
use crate::config::ModelSettings;
use crate::errors::{ConfigError, ModelQueryError};
use crate::observability::messages::model::{
    ModelAttemptFailed, ModelQueryCompleted, ModelQueryFailed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::ModelClient;

/// Model client that retries transient failures a bounded number of times.
///
/// `max_attempts` counts every attempt including the first, so a client built
/// with `max_attempts = 3` calls the transport at most three times. Rejected
/// and malformed responses end the query immediately.
pub struct RetryingModelClient<T = HttpTransport> {
    transport: T,
    max_attempts: u32,
    retry_delay: Duration,
    allowed_models: Vec<String>,
}

impl RetryingModelClient<HttpTransport> {
    pub fn from_settings(settings: &ModelSettings) -> Result<Self, ConfigError> {
        let transport = HttpTransport::from_settings(settings)
            .map_err(|e| ConfigError::ModelClient(e.to_string()))?;
        Ok(Self::new(transport, settings.max_retries, settings.retry_delay)
            .with_allowed_models(settings.allowed_models.clone()))
    }
}

impl<T: ModelTransport> RetryingModelClient<T> {
    pub fn new(transport: T, max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
            retry_delay,
            allowed_models: Vec::new(),
        }
    }

    /// Restrict queries to these model identifiers. An empty list allows all.
    pub fn with_allowed_models(mut self, allowed_models: Vec<String>) -> Self {
        self.allowed_models = allowed_models;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn check_allowed(&self, model_id: &str) -> Result<(), ModelQueryError> {
        if self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model_id) {
            Ok(())
        } else {
            Err(ModelQueryError::ModelNotAllowed {
                model_id: model_id.to_string(),
            })
        }
    }

    async fn attempt_all(&self, model_id: &str, prompt: &str) -> Result<(String, u32), ModelQueryError> {
        let mut last_cause = String::new();

        for attempt in 1..=self.max_attempts {
            match self.transport.send(model_id, prompt).await {
                Ok(output) => return Ok((output, attempt)),
                Err(AttemptError::Transient(cause)) => {
                    ModelAttemptFailed {
                        model_id,
                        attempt,
                        max_attempts: self.max_attempts,
                        cause: &cause,
                    }
                    .log();
                    last_cause = cause;

                    if attempt < self.max_attempts && !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(AttemptError::Rejected { status, body }) => {
                    return Err(ModelQueryError::Rejected {
                        model_id: model_id.to_string(),
                        status,
                        body,
                    });
                }
                Err(AttemptError::Malformed(cause)) => {
                    return Err(ModelQueryError::MalformedResponse {
                        model_id: model_id.to_string(),
                        cause,
                    });
                }
            }
        }

        Err(ModelQueryError::RetriesExhausted {
            model_id: model_id.to_string(),
            attempts: self.max_attempts,
            last_cause,
        })
    }
}

#[async_trait]
impl<T: ModelTransport> ModelClient for RetryingModelClient<T> {
    async fn query(&self, model_id: &str, prompt: &str) -> Result<String, ModelQueryError> {
        self.check_allowed(model_id)?;

        let start_time = Instant::now();
        match self.attempt_all(model_id, prompt).await {
            Ok((output, attempts)) => {
                ModelQueryCompleted {
                    model_id,
                    attempts,
                    output_size: output.len(),
                    duration: start_time.elapsed(),
                }
                .log();
                Ok(output)
            }
            Err(error) => {
                ModelQueryFailed {
                    model_id,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }
}
