// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Step dispatch, results and output sinks.

pub mod dispatch;
pub mod result;
pub mod run;
pub mod sink;

pub use dispatch::DispatchEngine;
pub use result::{EngineState, ExecutionResult, FailureKind, RunSummary, StepOutcome};
pub use run::{run_document, run_file};
pub use sink::{CollectingSink, ConsoleSink, OutputSink};
