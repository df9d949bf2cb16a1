// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::{ModelQueryError, PluginError};
use crate::traits::{ModelClient, Plugin};

/// A plugin that answers every action with the same text and records what it saw.
pub struct StubPlugin {
    pub name: String,
    pub reply: String,
    pub seen: Mutex<Vec<String>>,
}

impl StubPlugin {
    pub fn new(name: &str, reply: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Plugin for StubPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        self.seen.lock().unwrap().push(action.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A plugin whose backend is always down.
pub struct FailingPlugin {
    pub name: String,
}

impl FailingPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl Plugin for FailingPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        Err(PluginError::downstream(&self.name, action, "connection refused"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A model client that returns a fixed reply and counts queries.
pub struct StubModelClient {
    pub reply: String,
    pub queries: AtomicUsize,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl StubModelClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            queries: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn query(&self, model_id: &str, prompt: &str) -> Result<String, ModelQueryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((model_id.to_string(), prompt.to_string()));
        Ok(self.reply.clone())
    }
}

/// A model client whose retries are always exhausted.
pub struct FailingModelClient;

#[async_trait]
impl ModelClient for FailingModelClient {
    async fn query(&self, model_id: &str, _prompt: &str) -> Result<String, ModelQueryError> {
        Err(ModelQueryError::RetriesExhausted {
            model_id: model_id.to_string(),
            attempts: 3,
            last_cause: "connection refused".to_string(),
        })
    }
}
