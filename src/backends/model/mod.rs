// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generative-model client with bounded, fixed-delay retry.
//!
//! The retry policy lives in [`RetryingModelClient`]; a single attempt is
//! delegated to a [`ModelTransport`]. [`HttpTransport`] is the production
//! transport speaking `POST {endpoint}/v1/models/{model_id}/query`.

mod http;
mod retrying;
mod transport;

pub use http::HttpTransport;
pub use retrying::RetryingModelClient;
pub use transport::{AttemptError, ModelTransport};
