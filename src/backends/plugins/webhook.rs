// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::json;
use std::time::Duration;

use super::action::{unknown_action, Action};
use crate::config::{validate_endpoint, PluginSettings, UnknownActionPolicy};
use crate::errors::PluginError;
use crate::traits::Plugin;

pub const WEBHOOK_PLUGIN_NAME: &str = "webhook";

/// Notification plugin posting `{"text": <message>}` to a webhook URL.
pub struct WebhookPlugin {
    client: Client,
    url: Url,
    token: Option<String>,
    policy: UnknownActionPolicy,
}

impl WebhookPlugin {
    /// Settings: `url` (required), optional `token`, `timeout_seconds` (30).
    pub fn from_settings(
        settings: &PluginSettings,
        policy: UnknownActionPolicy,
    ) -> Result<Self, PluginError> {
        let url = settings.require(WEBHOOK_PLUGIN_NAME, "url")?;
        let url = validate_endpoint(url)
            .map_err(|e| PluginError::invalid_settings(WEBHOOK_PLUGIN_NAME, e.to_string()))?;
        let timeout = settings.parse_or(WEBHOOK_PLUGIN_NAME, "timeout_seconds", 30u64)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| PluginError::invalid_settings(WEBHOOK_PLUGIN_NAME, e.to_string()))?;

        Ok(Self {
            client,
            url,
            token: settings.get("token").filter(|t| !t.is_empty()).map(str::to_string),
            policy,
        })
    }

    async fn dispatch(&self, action: &str, request: RequestBuilder) -> Result<u16, PluginError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| PluginError::downstream(self.name(), action, e))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(PluginError::downstream(
                self.name(),
                action,
                format!("HTTP {}: {}", status, body),
            ))
        }
    }
}

#[async_trait]
impl Plugin for WebhookPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        let parsed = Action::parse(action);

        match parsed.verb {
            "ping" | "check_connection" => {
                let status = self.dispatch(action, self.client.get(self.url.clone())).await?;
                Ok(format!("OK ({})", status))
            }
            "send" => {
                let message = parsed.require_argument(self.name(), action)?;
                let request = self
                    .client
                    .post(self.url.clone())
                    .json(&json!({ "text": message }));
                let status = self.dispatch(action, request).await?;
                Ok(format!("sent ({})", status))
            }
            _ => unknown_action(self.name(), action, self.policy),
        }
    }

    fn name(&self) -> &str {
        WEBHOOK_PLUGIN_NAME
    }
}
