// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{self, Stdout, Write};

use super::result::{ExecutionResult, StepOutcome};
use crate::config::{OutputFormat, OutputSettings, Verbosity};

/// Receives each step's result as soon as it is known.
///
/// A failing sink never stops the run; the engine logs the error and goes on.
pub trait OutputSink: Send {
    fn report(&mut self, result: &ExecutionResult) -> io::Result<()>;
}

/// Writes one line per result to a writer (stdout by default).
///
/// Text lines look like `[ok] #1 MCP:gpt-4:Say hi => hi there` or
/// `[failed:plugin] #3 PLUGIN:unknown.foo => unknown plugin ...`, numbering
/// steps from 1. JSON lines carry the serialized [`ExecutionResult`].
/// At `quiet` verbosity only failures are written. This filters rendering
/// only; the engine's `RunSummary` keeps every result.
pub struct ConsoleSink<W = Stdout> {
    writer: W,
    format: OutputFormat,
    verbosity: Verbosity,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(settings: &OutputSettings) -> Self {
        Self::new(io::stdout(), settings)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W, settings: &OutputSettings) -> Self {
        Self {
            writer,
            format: settings.format,
            verbosity: settings.verbosity,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_text(&mut self, result: &ExecutionResult) -> io::Result<()> {
        let position = result.index + 1;
        match &result.outcome {
            StepOutcome::Success { output } => {
                writeln!(self.writer, "[ok] #{} {} => {}", position, result.step, output)
            }
            StepOutcome::Failure { kind, message } => writeln!(
                self.writer,
                "[failed:{}] #{} {} => {}",
                kind, position, result.step, message
            ),
        }
    }

    fn write_json(&mut self, result: &ExecutionResult) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, result)?;
        writeln!(self.writer)
    }
}

impl<W: Write + Send> OutputSink for ConsoleSink<W> {
    fn report(&mut self, result: &ExecutionResult) -> io::Result<()> {
        if self.verbosity == Verbosity::Quiet && result.outcome.is_success() {
            return Ok(());
        }

        match self.format {
            OutputFormat::Text => self.write_text(result)?,
            OutputFormat::Json => self.write_json(result)?,
        }
        self.writer.flush()
    }
}

/// Keeps every reported result in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    results: Vec<ExecutionResult>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ExecutionResult> {
        self.results
    }
}

impl OutputSink for CollectingSink {
    fn report(&mut self, result: &ExecutionResult) -> io::Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::result::FailureKind;

    fn results() -> Vec<ExecutionResult> {
        vec![
            ExecutionResult {
                index: 0,
                step: "MCP:gpt-4:Say hi".to_string(),
                outcome: StepOutcome::Success {
                    output: "hi there".to_string(),
                },
            },
            ExecutionResult {
                index: 2,
                step: "PLUGIN:unknown.foo".to_string(),
                outcome: StepOutcome::Failure {
                    kind: FailureKind::Plugin,
                    message: "unknown plugin 'unknown' (action 'foo')".to_string(),
                },
            },
        ]
    }

    fn render(format: OutputFormat, verbosity: Verbosity) -> String {
        let mut sink = ConsoleSink::new(Vec::new(), &OutputSettings { format, verbosity });
        for result in results() {
            sink.report(&result).unwrap();
        }
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_console_sink_table_driven() {
        struct TestCase {
            name: &'static str,
            format: OutputFormat,
            verbosity: Verbosity,
            expected: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "text at normal verbosity",
                format: OutputFormat::Text,
                verbosity: Verbosity::Normal,
                expected: "[ok] #1 MCP:gpt-4:Say hi => hi there\n\
                           [failed:plugin] #3 PLUGIN:unknown.foo => unknown plugin 'unknown' (action 'foo')\n",
            },
            TestCase {
                name: "quiet drops successes",
                format: OutputFormat::Text,
                verbosity: Verbosity::Quiet,
                expected: "[failed:plugin] #3 PLUGIN:unknown.foo => unknown plugin 'unknown' (action 'foo')\n",
            },
            TestCase {
                name: "verbose text matches normal",
                format: OutputFormat::Text,
                verbosity: Verbosity::Verbose,
                expected: "[ok] #1 MCP:gpt-4:Say hi => hi there\n\
                           [failed:plugin] #3 PLUGIN:unknown.foo => unknown plugin 'unknown' (action 'foo')\n",
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                render(test_case.format, test_case.verbosity),
                test_case.expected,
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[test]
    fn test_console_sink_json_lines() {
        let rendered = render(OutputFormat::Json, Verbosity::Normal);
        let lines: Vec<serde_json::Value> = rendered
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["output"], "hi there");
        assert_eq!(lines[1]["kind"], "plugin");
        assert_eq!(lines[1]["index"], 2);
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let mut sink = CollectingSink::new();
        for result in results() {
            sink.report(&result).unwrap();
        }
        let indices: Vec<usize> = sink.results().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2]);

        let owned = sink.into_results();
        assert_eq!(owned, results());
    }
}
