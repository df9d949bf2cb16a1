// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Terminal failure of a model query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelQueryError {
    /// Every attempt failed with a transient error.
    #[error("model '{model_id}' query failed after {attempts} attempt(s): {last_cause}")]
    RetriesExhausted {
        model_id: String,
        attempts: u32,
        last_cause: String,
    },

    /// The endpoint answered with a status that is not worth retrying.
    #[error("model '{model_id}' query rejected with status {status}: {body}")]
    Rejected {
        model_id: String,
        status: u16,
        body: String,
    },

    /// A successful response did not carry a string `output` field.
    #[error("model '{model_id}' returned a malformed response: {cause}")]
    MalformedResponse { model_id: String, cause: String },

    /// The model identifier is not in the configured allow-list.
    #[error("model '{model_id}' is not in the allowed model list")]
    ModelNotAllowed { model_id: String },
}

impl ModelQueryError {
    pub fn model_id(&self) -> &str {
        match self {
            ModelQueryError::RetriesExhausted { model_id, .. }
            | ModelQueryError::Rejected { model_id, .. }
            | ModelQueryError::MalformedResponse { model_id, .. }
            | ModelQueryError::ModelNotAllowed { model_id } => model_id,
        }
    }
}
