//! Per-invocation outcome of the generation pipeline.

use std::path::PathBuf;

use crate::error::GenerateError;

/// Pipeline stage a failure was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Config,
    ReadSource,
    Send,
    Status,
    Parse,
    Render,
    Write,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Config => "config",
            Step::ReadSource => "read source",
            Step::Send => "send",
            Step::Status => "status",
            Step::Parse => "parse",
            Step::Render => "render",
            Step::Write => "write",
        }
    }
}

#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: GenerateError,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub failures: Vec<StepFailure>,
    /// File written by this invocation, if any.
    pub written: Option<PathBuf>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: Step, error: GenerateError) {
        tracing::error!("{} step failed: {}", step.as_str(), error);
        self.failures.push(StepFailure { step, error });
    }

    /// True when no step failed and a file was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.written.is_some()
    }

    pub fn first_failure(&self) -> Option<&StepFailure> {
        self.failures.first()
    }
}
