// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use mcp_task_runner::config::{load_config, RuntimeBuilder};
use mcp_task_runner::engine::ConsoleSink;
use mcp_task_runner::observability::messages::engine::RunAborted;
use mcp_task_runner::observability::messages::StructuredLog;

/// Filter used while the configuration is still loading.
const BOOTSTRAP_FILTER: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <config.yaml|config.toml>", args[0]);
        eprintln!("Example: {} tasks.yaml", args[0]);
        bail!("expected exactly one configuration file");
    }
    let config_file = &args[1];

    // RUST_LOG wins over the configured verbosity
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, reload_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_FILTER)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = load_config(config_file)
        .and_then(|cfg| RuntimeBuilder::from_config(Arc::new(cfg)));
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(error) => {
            RunAborted { error: &error }.log();
            return Ok(ExitCode::FAILURE);
        }
    };

    let output = engine.config().output;
    if !from_env {
        reload_handle
            .reload(EnvFilter::new(output.verbosity.log_filter()))
            .context("failed to apply configured log verbosity")?;
    }

    let mut sink = ConsoleSink::stdout(&output);
    let summary = engine.run(&mut sink).await;

    if summary.failed() > 0 {
        eprintln!(
            "{} of {} steps failed",
            summary.failed(),
            summary.results.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}
