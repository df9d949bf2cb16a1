// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::errors::ConfigError;

/// Lifecycle of a [`DispatchEngine`](super::DispatchEngine) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Running,
    Completed,
    /// Configuration loading failed; no step was executed.
    Aborted,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Completed => "completed",
            EngineState::Aborted => "aborted",
        };
        f.write_str(label)
    }
}

/// Which stage of dispatch a failed step broke in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Parse,
    Plugin,
    ModelQuery,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Parse => "parse",
            FailureKind::Plugin => "plugin",
            FailureKind::ModelQuery => "model_query",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Success { output: String },
    Failure { kind: FailureKind, message: String },
}

impl StepOutcome {
    pub fn failure(kind: FailureKind, error: &dyn std::error::Error) -> Self {
        StepOutcome::Failure {
            kind,
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success { .. })
    }
}

/// Outcome of one step, tagged with its position in `tasks` and its raw text.
///
/// Serializes flat, e.g.
/// `{"index":2,"step":"PLUGIN:unknown.foo","status":"failure","kind":"plugin","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Zero-based position of the step in the task list.
    pub index: usize,
    pub step: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl ExecutionResult {
    pub fn output(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Success { output } => Some(output),
            StepOutcome::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            StepOutcome::Success { .. } => None,
            StepOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Everything a run produced, in step order.
#[derive(Debug)]
pub struct RunSummary {
    pub state: EngineState,
    pub results: Vec<ExecutionResult>,
    /// Set only when the run was aborted before any step ran.
    pub abort: Option<ConfigError>,
}

impl RunSummary {
    pub fn completed(results: Vec<ExecutionResult>) -> Self {
        Self {
            state: EngineState::Completed,
            results,
            abort: None,
        }
    }

    pub fn aborted(error: ConfigError) -> Self {
        Self {
            state: EngineState::Aborted,
            results: Vec::new(),
            abort: Some(error),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn is_aborted(&self) -> bool {
        self.state == EngineState::Aborted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(index: usize, step: &str, output: &str) -> ExecutionResult {
        ExecutionResult {
            index,
            step: step.to_string(),
            outcome: StepOutcome::Success {
                output: output.to_string(),
            },
        }
    }

    #[test]
    fn test_result_serializes_flat() {
        let failure = ExecutionResult {
            index: 2,
            step: "PLUGIN:unknown.foo".to_string(),
            outcome: StepOutcome::Failure {
                kind: FailureKind::Plugin,
                message: "unknown plugin 'unknown' (action 'foo')".to_string(),
            },
        };

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "index": 2,
                "step": "PLUGIN:unknown.foo",
                "status": "failure",
                "kind": "plugin",
                "message": "unknown plugin 'unknown' (action 'foo')",
            })
        );

        let json = serde_json::to_value(success(0, "MCP:gpt-4:Say hi", "hi there")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["output"], "hi there");
    }

    #[test]
    fn test_summary_counts() {
        let parse_error = crate::errors::ParseError::new("missing prefix", "bogus");
        let summary = RunSummary::completed(vec![
            success(0, "PLUGIN:memory.ping", "PONG"),
            ExecutionResult {
                index: 1,
                step: "bogus".to_string(),
                outcome: StepOutcome::failure(FailureKind::Parse, &parse_error),
            },
            success(2, "PLUGIN:memory.keys", ""),
        ]);

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_aborted());
        assert_eq!(summary.results[1].failure_kind(), Some(FailureKind::Parse));
        assert_eq!(summary.results[0].output(), Some("PONG"));
    }

    #[test]
    fn test_aborted_summary_has_no_results() {
        let summary = RunSummary::aborted(ConfigError::MissingSection("tasks"));
        assert!(summary.is_aborted());
        assert_eq!(summary.succeeded(), 0);
        assert_eq!(summary.failed(), 0);
        assert!(summary.abort.is_some());
    }
}
