// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Redis plugin built on the `redis` crate's multiplexed async connection.
//!
//! The connection is opened on first use and kept for the rest of the run.
//! A failed command drops it, and the next step reconnects.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, AsyncConnectionConfig, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;
use tokio::sync::Mutex;

use super::action::{unknown_action, Action};
use crate::config::{PluginSettings, UnknownActionPolicy};
use crate::errors::PluginError;
use crate::observability::messages::plugin::PluginConnectionOpened;
use crate::observability::messages::StructuredLog;
use crate::traits::Plugin;

pub const REDIS_PLUGIN_NAME: &str = "redis";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub struct RedisPlugin {
    client: redis::Client,
    host: String,
    port: u16,
    db: i64,
    timeout: Duration,
    policy: UnknownActionPolicy,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisPlugin {
    /// Settings: `host` (default 127.0.0.1), `port` (6379), optional
    /// `username` and `password`, `db` (0), `timeout_seconds` (30).
    pub fn from_settings(
        settings: &PluginSettings,
        policy: UnknownActionPolicy,
    ) -> Result<Self, PluginError> {
        let host = settings.get_or("host", DEFAULT_HOST).trim().to_string();
        let port = settings.parse_or(REDIS_PLUGIN_NAME, "port", DEFAULT_PORT)?;
        let db = settings.parse_or(REDIS_PLUGIN_NAME, "db", 0i64)?;
        let timeout = settings.parse_or(REDIS_PLUGIN_NAME, "timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?;
        let non_empty = |key: &str| settings.get(key).filter(|v| !v.is_empty()).map(str::to_string);

        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host.clone(), port),
            redis: RedisConnectionInfo {
                db,
                username: non_empty("username"),
                password: non_empty("password"),
                ..Default::default()
            },
        };
        let client = redis::Client::open(info)
            .map_err(|e| PluginError::invalid_settings(REDIS_PLUGIN_NAME, e.to_string()))?;

        Ok(Self {
            client,
            host,
            port,
            db,
            timeout: Duration::from_secs(timeout),
            policy,
            connection: Mutex::new(None),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The held connection, opening one when there is none.
    async fn connection(&self, action: &str) -> Result<MultiplexedConnection, PluginError> {
        let mut slot = self.connection.lock().await;
        if let Some(connection) = slot.as_ref() {
            return Ok(connection.clone());
        }

        let config = AsyncConnectionConfig::new()
            .set_connection_timeout(self.timeout)
            .set_response_timeout(self.timeout);
        let connection = self
            .client
            .get_multiplexed_async_connection_with_config(&config)
            .await
            .map_err(|e| PluginError::downstream(self.name(), action, format!("{}: {}", self.address(), e)))?;

        PluginConnectionOpened {
            plugin_name: self.name(),
            address: &self.address(),
        }
        .log();
        *slot = Some(connection.clone());
        Ok(connection)
    }

    /// Map a command result, forgetting the connection when it failed.
    async fn finish<T>(&self, action: &str, result: redis::RedisResult<T>) -> Result<T, PluginError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                // an error reply leaves the connection usable
                if error.kind() != redis::ErrorKind::ResponseError {
                    self.connection.lock().await.take();
                }
                Err(PluginError::downstream(self.name(), action, error))
            }
        }
    }
}

#[async_trait]
impl Plugin for RedisPlugin {
    async fn execute(&self, action: &str) -> Result<String, PluginError> {
        let parsed = Action::parse(action);

        match parsed.verb {
            "ping" => {
                let mut conn = self.connection(action).await?;
                let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                self.finish(action, result).await
            }
            "check_connection" => {
                let mut conn = self.connection(action).await?;
                let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                self.finish(action, result).await?;
                Ok(format!("connected to {} (db {})", self.address(), self.db))
            }
            "get" => {
                let key = parsed.require_argument(self.name(), action)?;
                let mut conn = self.connection(action).await?;
                let result: redis::RedisResult<Option<String>> = conn.get(key).await;
                Ok(self
                    .finish(action, result)
                    .await?
                    .unwrap_or_else(|| "(nil)".to_string()))
            }
            "set" => {
                let (key, value) = parsed.require_key_value(self.name(), action)?;
                let mut conn = self.connection(action).await?;
                let result: redis::RedisResult<String> = conn.set(key, value).await;
                self.finish(action, result).await
            }
            "del" => {
                let key = parsed.require_argument(self.name(), action)?;
                let mut conn = self.connection(action).await?;
                let result: redis::RedisResult<i64> = conn.del(key).await;
                Ok(self.finish(action, result).await?.to_string())
            }
            _ => unknown_action(self.name(), action, self.policy),
        }
    }

    fn name(&self) -> &str {
        REDIS_PLUGIN_NAME
    }
}
