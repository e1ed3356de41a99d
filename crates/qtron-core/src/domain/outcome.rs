//! Outcome model: what one tool invocation reported.

use std::path::PathBuf;
use std::time::Duration;

/// One call of the external tool: `program args...` under `timeout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<PathBuf>,
    pub timeout: Duration,
}

impl ToolInvocation {
    /// `tool script input output`, the simplification calling convention.
    pub fn simplify(
        tool: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: tool.into(),
            args: vec![script.into(), input.into(), output.into()],
            timeout,
        }
    }
}

/// Captured result of a settled process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}
