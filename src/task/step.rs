// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Textual grammar of a single task step.
//!
//! ```text
//! MCP:<model_id>:<prompt text, may contain ':'>
//! PLUGIN:<plugin_name>.<action string, may contain '.'>
//! ```

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

pub const MODEL_QUERY_PREFIX: &str = "MCP:";
pub const PLUGIN_ACTION_PREFIX: &str = "PLUGIN:";

/// One parsed line of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStep {
    /// Send `prompt` to the model identified by `model_id`.
    ModelQuery { model_id: String, prompt: String },
    /// Hand `action` to the plugin registered as `plugin_name`.
    PluginAction { plugin_name: String, action: String },
}

impl TaskStep {
    /// Parse a raw step string.
    ///
    /// The model identifier is trimmed; the prompt is everything after the
    /// second `:` and is kept verbatim. The plugin name is the text before the
    /// first `.`, the action everything after it.
    ///
    /// # Example
    /// ```
    /// use mcp_task_runner::task::TaskStep;
    ///
    /// let step = TaskStep::parse("MCP:gpt-4:Translate: hello").unwrap();
    /// assert_eq!(
    ///     step,
    ///     TaskStep::ModelQuery {
    ///         model_id: "gpt-4".to_string(),
    ///         prompt: "Translate: hello".to_string(),
    ///     }
    /// );
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if let Some(rest) = raw.strip_prefix(MODEL_QUERY_PREFIX) {
            Self::parse_model_query(raw, rest)
        } else if let Some(rest) = raw.strip_prefix(PLUGIN_ACTION_PREFIX) {
            Self::parse_plugin_action(raw, rest)
        } else {
            Err(ParseError::new(
                format!(
                    "step must start with '{}' or '{}'",
                    MODEL_QUERY_PREFIX, PLUGIN_ACTION_PREFIX
                ),
                raw,
            ))
        }
    }

    fn parse_model_query(raw: &str, rest: &str) -> Result<Self, ParseError> {
        let mut fields = rest.split(':');
        // split always yields at least one field
        let model_id = fields.next().unwrap_or_default().trim();
        let remaining: Vec<&str> = fields.collect();

        if remaining.is_empty() {
            return Err(ParseError::new(
                "model query needs both a model identifier and a prompt",
                raw,
            ));
        }
        if model_id.is_empty() {
            return Err(ParseError::new("model identifier is empty", raw));
        }
        // the id becomes a URL path segment
        if model_id == "." || model_id == ".." {
            return Err(ParseError::new(
                format!("model identifier '{}' is not allowed", model_id),
                raw,
            ));
        }

        Ok(TaskStep::ModelQuery {
            model_id: model_id.to_string(),
            prompt: remaining.join(":"),
        })
    }

    fn parse_plugin_action(raw: &str, rest: &str) -> Result<Self, ParseError> {
        let (plugin_name, action) = rest.split_once('.').ok_or_else(|| {
            ParseError::new("plugin action needs '<plugin>.<action>'", raw)
        })?;

        if plugin_name.is_empty() {
            return Err(ParseError::new("plugin name is empty", raw));
        }
        if action.is_empty() {
            return Err(ParseError::new("plugin action is empty", raw));
        }

        Ok(TaskStep::PluginAction {
            plugin_name: plugin_name.to_string(),
            action: action.to_string(),
        })
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskStep::ModelQuery { .. } => "model_query",
            TaskStep::PluginAction { .. } => "plugin_action",
        }
    }
}

impl FromStr for TaskStep {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TaskStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStep::ModelQuery { model_id, prompt } => {
                write!(f, "{}{}:{}", MODEL_QUERY_PREFIX, model_id, prompt)
            }
            TaskStep::PluginAction {
                plugin_name,
                action,
            } => write!(f, "{}{}.{}", PLUGIN_ACTION_PREFIX, plugin_name, action),
        }
    }
}
