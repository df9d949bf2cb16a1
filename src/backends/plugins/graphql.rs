// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use std::time::Duration;

use super::action::{unknown_action, Action};
use crate::config::{validate_endpoint, PluginSettings, UnknownActionPolicy};
use crate::errors::PluginError;
use crate::traits::Plugin;

pub const GRAPHQL_PLUGIN_NAME: &str = "graphql";

const INTROSPECTION_QUERY: &str =
    "{ __schema { queryType { name } mutationType { name } types { name kind } } }";
const CONNECTION_QUERY: &str = "{ __typename }";

/// GraphQL gateway plugin. Returns the `data` member of each response as JSON text.
pub struct GraphqlPlugin {
    client: Client,
    endpoint: Url,
    token: Option<String>,
    policy: UnknownActionPolicy,
}

impl GraphqlPlugin {
    /// Settings: `endpoint` (required), optional `token`, `timeout_seconds` (30).
    pub fn from_settings(
        settings: &PluginSettings,
        policy: UnknownActionPolicy,
    ) -> Result<Self, PluginError> {
        let endpoint = settings.require(GRAPHQL_PLUGIN_NAME, "endpoint")?;
        let endpoint = validate_endpoint(endpoint)
            .map_err(|e| PluginError::invalid_settings(GRAPHQL_PLUGIN_NAME, e.to_string()))?;
        let timeout = settings.parse_or(GRAPHQL_PLUGIN_NAME, "timeout_seconds", 30u64)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| PluginError::invalid_settings(GRAPHQL_PLUGIN_NAME, e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            token: settings.get("token").filter(|t| !t.is_empty()).map(str::to_string),
            policy,
        })
    }

    async fn post_query(&self, action: &str, document: &str) -> Result<Value, PluginError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "query": document }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PluginError::downstream(self.name(), action, e))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PluginError::downstream(self.name(), action, format!("HTTP {}: {}", status, e)))?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect();
                return Err(PluginError::downstream(self.name(), action, messages.join("; ")));
            }
        }
        if !status.is_success() {
            return Err(PluginError::downstream(self.name(), action, format!("HTTP {}", status)));
        }

        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl Plugin for GraphqlPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        let parsed = Action::parse(action);

        match parsed.verb {
            "check_connection" => {
                self.post_query(action, CONNECTION_QUERY).await?;
                Ok("OK".to_string())
            }
            "introspect" => Ok(self.post_query(action, INTROSPECTION_QUERY).await?.to_string()),
            "query" => {
                let document = parsed.require_argument(self.name(), action)?;
                Ok(self.post_query(action, document).await?.to_string())
            }
            _ => unknown_action(self.name(), action, self.policy),
        }
    }

    fn name(&self) -> &str {
        GRAPHQL_PLUGIN_NAME
    }
}
