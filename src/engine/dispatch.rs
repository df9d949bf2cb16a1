// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use super::result::{EngineState, ExecutionResult, FailureKind, RunSummary, StepOutcome};
use super::sink::OutputSink;
use crate::config::{Configuration, PluginRegistry};
use crate::errors::PluginError;
use crate::observability::messages::engine::{RunCompleted, RunStarted, SinkWriteFailed};
use crate::observability::messages::step::{StepFailed, StepStarted, StepSucceeded};
use crate::observability::messages::StructuredLog;
use crate::task::TaskStep;
use crate::traits::ModelClient;

type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Walks a configuration's task list in order, routing each step to the model
/// client or to a registered plugin.
///
/// Steps never abort the run: parse errors, unknown plugins, plugin failures
/// and model failures are all recorded as failed [`ExecutionResult`]s and the
/// engine moves on to the next step. Each result reaches the sink before the
/// next step starts.
///
/// A run always starts again from the first step; calling [`run`](Self::run)
/// twice executes the task list twice.
pub struct DispatchEngine {
    config: Arc<Configuration>,
    plugins: PluginRegistry,
    model: Arc<dyn ModelClient>,
    state: EngineState,
}

impl DispatchEngine {
    pub fn new(config: Arc<Configuration>, plugins: PluginRegistry, model: Arc<dyn ModelClient>) -> Self {
        Self {
            config,
            plugins,
            model,
            state: EngineState::Idle,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub async fn run(&mut self, sink: &mut dyn OutputSink) -> RunSummary {
        self.state = EngineState::Running;
        let start_time = Instant::now();

        let started = RunStarted {
            step_count: self.config.tasks.len(),
            plugin_count: self.plugins.len(),
        };
        started.log();
        let span = started.span("dispatch");

        let results = self.run_steps(sink).instrument(span).await;

        self.state = EngineState::Completed;
        let summary = RunSummary::completed(results);
        RunCompleted {
            step_count: summary.results.len(),
            succeeded: summary.succeeded(),
            failed: summary.failed(),
            duration: start_time.elapsed(),
        }
        .log();

        summary
    }

    async fn run_steps(&self, sink: &mut dyn OutputSink) -> Vec<ExecutionResult> {
        let mut results = Vec::with_capacity(self.config.tasks.len());

        for (index, raw) in self.config.tasks.iter().enumerate() {
            let started = StepStarted { index, raw };
            started.log();
            let result = self
                .execute_step(index, raw)
                .instrument(started.span("step"))
                .await;

            if let Err(error) = sink.report(&result) {
                SinkWriteFailed { index, error: &error }.log();
            }
            results.push(result);
        }

        results
    }

    /// Parse and dispatch a single raw step.
    pub async fn execute_step(&self, index: usize, raw: &str) -> ExecutionResult {
        let start_time = Instant::now();

        let outcome = match TaskStep::parse(raw) {
            Ok(step) => match self.dispatch(&step).await {
                Ok(output) => {
                    StepSucceeded {
                        index,
                        kind: step.kind(),
                        output_size: output.len(),
                        duration: start_time.elapsed(),
                    }
                    .log();
                    StepOutcome::Success { output }
                }
                Err((kind, error)) => failed(index, kind, error.as_ref()),
            },
            Err(error) => failed(index, FailureKind::Parse, &error),
        };

        ExecutionResult {
            index,
            step: raw.to_string(),
            outcome,
        }
    }

    async fn dispatch(&self, step: &TaskStep) -> Result<String, (FailureKind, StepError)> {
        match step {
            TaskStep::ModelQuery { model_id, prompt } => self
                .model
                .query(model_id, prompt)
                .await
                .map_err(|e| (FailureKind::ModelQuery, e.into())),
            TaskStep::PluginAction { plugin_name, action } => {
                let Some(plugin) = self.plugins.get(plugin_name) else {
                    let error = PluginError::UnknownPlugin {
                        plugin_name: plugin_name.clone(),
                        action: action.clone(),
                    };
                    return Err((FailureKind::Plugin, Box::new(error) as StepError));
                };
                plugin
                    .execute(action)
                    .await
                    .map_err(|e| (FailureKind::Plugin, e.into()))
            }
        }
    }
}

fn failed(index: usize, kind: FailureKind, error: &(dyn std::error::Error + 'static)) -> StepOutcome {
    StepFailed {
        index,
        kind: kind.as_str(),
        error,
    }
    .log();
    StepOutcome::failure(kind, error)
}

impl std::fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("state", &self.state)
            .field("step_count", &self.config.tasks.len())
            .field("plugins", &self.plugins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{StubModelClient, StubPlugin};
    use crate::engine::CollectingSink;

    fn config(tasks: &[&str]) -> Arc<Configuration> {
        let mut yaml = String::from("context: {}\nmodel: {endpoint: 'http://localhost:9000'}\n");
        if tasks.is_empty() {
            yaml.push_str("tasks: []\n");
        } else {
            yaml.push_str("tasks:\n");
            for task in tasks {
                yaml.push_str(&format!("  - '{}'\n", task));
            }
        }
        Arc::new(Configuration::load(&yaml).unwrap())
    }

    fn engine(tasks: &[&str]) -> DispatchEngine {
        let mut plugins = PluginRegistry::new();
        plugins.insert("memory", Arc::new(StubPlugin::new("memory", "PONG")));
        DispatchEngine::new(config(tasks), plugins, Arc::new(StubModelClient::new("hi there")))
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let mut engine = engine(&["PLUGIN:memory.ping"]);
        assert_eq!(engine.state(), EngineState::Idle);

        let summary = engine.run(&mut CollectingSink::new()).await;

        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(summary.state, EngineState::Completed);
        assert!(summary.abort.is_none());
    }

    #[tokio::test]
    async fn test_execute_step_failure_kinds_table_driven() {
        struct TestCase {
            name: &'static str,
            raw: &'static str,
            expected_kind: Option<FailureKind>,
        }

        let test_cases = vec![
            TestCase {
                name: "model query succeeds",
                raw: "MCP:gpt-4:Say hi",
                expected_kind: None,
            },
            TestCase {
                name: "registered plugin succeeds",
                raw: "PLUGIN:memory.ping",
                expected_kind: None,
            },
            TestCase {
                name: "missing prefix is a parse failure",
                raw: "SHELL:ls",
                expected_kind: Some(FailureKind::Parse),
            },
            TestCase {
                name: "lowercase prefix is a parse failure",
                raw: "mcp:gpt-4:hi",
                expected_kind: Some(FailureKind::Parse),
            },
            TestCase {
                name: "unregistered plugin is a plugin failure",
                raw: "PLUGIN:postgres.query:select 1",
                expected_kind: Some(FailureKind::Plugin),
            },
        ];

        let engine = engine(&[]);
        for (index, test_case) in test_cases.iter().enumerate() {
            let result = engine.execute_step(index, test_case.raw).await;
            assert_eq!(result.index, index);
            assert_eq!(result.step, test_case.raw);
            assert_eq!(
                result.failure_kind(),
                test_case.expected_kind,
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_plugin_message_names_plugin() {
        let engine = engine(&[]);
        let result = engine.execute_step(0, "PLUGIN:unknown.foo").await;
        match result.outcome {
            StepOutcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::Plugin);
                assert_eq!(message, "unknown plugin 'unknown' (action 'foo')");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
