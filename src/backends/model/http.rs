// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use super::transport::{AttemptError, ModelTransport};
use crate::config::ModelSettings;

/// Longest response body excerpt kept in error messages.
const MAX_BODY_EXCERPT: usize = 512;

#[derive(Serialize)]
struct QueryRequest<'a> {
    prompt: &'a str,
}

/// HTTP transport for model queries built on `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport whose client enforces the configured per-attempt timeout.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// `{endpoint}/v1/models/{model_id}/query`, with the model id percent-encoded.
    pub fn query_url(&self, model_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        // endpoint is validated as a base URL at load time
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "models", model_id, "query"]);
        }
        url
    }

    fn is_retryable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    fn excerpt(body: &str) -> String {
        if body.len() <= MAX_BODY_EXCERPT {
            return body.to_string();
        }
        let mut end = MAX_BODY_EXCERPT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }

    fn extract_output(body: &str) -> Result<String, AttemptError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| AttemptError::Malformed(format!("response is not JSON: {}", e)))?;

        value
            .get("output")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AttemptError::Malformed("response has no string 'output' field".to_string())
            })
    }
}

#[async_trait]
impl ModelTransport for HttpTransport {
    async fn send(&self, model_id: &str, prompt: &str) -> Result<String, AttemptError> {
        let mut request = self
            .client
            .post(self.query_url(model_id))
            .json(&QueryRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Transient(format!("request timed out: {}", e))
            } else if e.is_connect() {
                AttemptError::Transient(format!("endpoint not reachable: {}", e))
            } else {
                AttemptError::Transient(format!("network error: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(format!("failed to read response body: {}", e)))?;

        if status.is_success() {
            Self::extract_output(&body)
        } else if Self::is_retryable(status) {
            Err(AttemptError::Transient(format!(
                "HTTP {}: {}",
                status,
                Self::excerpt(&body)
            )))
        } else {
            Err(AttemptError::Rejected {
                status: status.as_u16(),
                body: Self::excerpt(&body),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn settings(endpoint: &str, api_key: Option<&str>) -> ModelSettings {
        ModelSettings {
            endpoint: Url::parse(endpoint).unwrap(),
            api_key: api_key.map(str::to_string),
            allowed_models: vec![],
            max_retries: 3,
            retry_delay: Duration::ZERO,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_query_url_table_driven() {
        let test_cases = vec![
            ("http://localhost:8080", "gpt-4", "http://localhost:8080/v1/models/gpt-4/query"),
            ("http://localhost:8080/", "gpt-4", "http://localhost:8080/v1/models/gpt-4/query"),
            ("https://api.example.com/base/", "m", "https://api.example.com/base/v1/models/m/query"),
            ("https://api.example.com", "a b/c", "https://api.example.com/v1/models/a%20b%2Fc/query"),
        ];

        for (endpoint, model_id, expected) in test_cases {
            let transport = HttpTransport::from_settings(&settings(endpoint, None)).unwrap();
            assert_eq!(transport.query_url(model_id).as_str(), expected);
        }
    }

    #[test]
    fn test_extract_output() {
        assert_eq!(
            HttpTransport::extract_output(r#"{"output": "hi there", "tokens": 3}"#).unwrap(),
            "hi there"
        );
        assert!(matches!(
            HttpTransport::extract_output(r#"{"result": "hi"}"#),
            Err(AttemptError::Malformed(_))
        ));
        assert!(matches!(
            HttpTransport::extract_output(r#"{"output": 42}"#),
            Err(AttemptError::Malformed(_))
        ));
        assert!(matches!(
            HttpTransport::extract_output("<html>"),
            Err(AttemptError::Malformed(_))
        ));
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(MAX_BODY_EXCERPT);
        let excerpt = HttpTransport::excerpt(&body);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.len() <= MAX_BODY_EXCERPT + 3);
    }

    #[tokio::test]
    async fn test_send_posts_prompt_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/models/gpt-4/query")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(json!({"prompt": "Say hi: now"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"output": "hi there"}"#)
            .create_async()
            .await;

        let transport =
            HttpTransport::from_settings(&settings(&server.url(), Some("test-key"))).unwrap();
        let output = transport.send("gpt-4", "Say hi: now").await.unwrap();

        assert_eq!(output, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_classifies_statuses() {
        struct TestCase {
            name: &'static str,
            status: usize,
            body: &'static str,
            transient: bool,
        }

        let test_cases = vec![
            TestCase { name: "server error", status: 500, body: "boom", transient: true },
            TestCase { name: "bad gateway", status: 502, body: "", transient: true },
            TestCase { name: "rate limited", status: 429, body: "slow down", transient: true },
            TestCase { name: "bad request", status: 400, body: "bad prompt", transient: false },
            TestCase { name: "not found", status: 404, body: "no model", transient: false },
            TestCase { name: "unauthorized", status: 401, body: "", transient: false },
        ];

        for test_case in test_cases {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/models/m/query")
                .with_status(test_case.status)
                .with_body(test_case.body)
                .create_async()
                .await;

            let transport = HttpTransport::from_settings(&settings(&server.url(), None)).unwrap();
            let err = transport.send("m", "p").await.unwrap_err();

            match (test_case.transient, err) {
                (true, AttemptError::Transient(_)) => {}
                (false, AttemptError::Rejected { status, .. }) => {
                    assert_eq!(status as usize, test_case.status, "{}", test_case.name)
                }
                (_, other) => panic!("Test case '{}': unexpected {:?}", test_case.name, other),
            }
        }
    }

    #[tokio::test]
    async fn test_send_unreachable_endpoint_is_transient() {
        // port 9 (discard) is closed on test hosts
        let transport =
            HttpTransport::from_settings(&settings("http://127.0.0.1:9", None)).unwrap();
        assert!(matches!(
            transport.send("m", "p").await,
            Err(AttemptError::Transient(_))
        ));
    }
}
