// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;

use super::result::RunSummary;
use super::sink::OutputSink;
use crate::config::{load_config, Configuration, RuntimeBuilder};
use crate::errors::ConfigError;
use crate::observability::messages::engine::RunAborted;
use crate::observability::messages::StructuredLog;

/// Load a YAML document, build the runtime and run it.
///
/// A configuration failure yields an `Aborted` summary and nothing is sent to
/// the sink.
pub async fn run_document(raw_document: &str, sink: &mut dyn OutputSink) -> RunSummary {
    run_loaded(Configuration::load(raw_document), sink).await
}

/// Same as [`run_document`] for a file on disk (YAML, or TOML by extension).
pub async fn run_file<P: AsRef<Path>>(path: P, sink: &mut dyn OutputSink) -> RunSummary {
    run_loaded(load_config(path), sink).await
}

async fn run_loaded(config: Result<Configuration, ConfigError>, sink: &mut dyn OutputSink) -> RunSummary {
    match config.and_then(|cfg| RuntimeBuilder::from_config(Arc::new(cfg))) {
        Ok(mut engine) => engine.run(sink).await,
        Err(error) => {
            RunAborted { error: &error }.log();
            RunSummary::aborted(error)
        }
    }
}
