//! Errors - エラー型と分類
//!
//! # 分類
//! - `AcquireError`: 呼び出し元に返る唯一のエラー（元ファイルすら読めない）
//! - `SimplifyError`: acquisition 内で吸収され、元ファイルへの fallback になる
//! - `InvocationError`: ToolRunner レベルの失敗（spawn / wait / timeout）
//!
//! Cleanup の失敗は型を持たず、ログに残すだけです。

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Fatal acquisition error: no bytes could be read at all.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("cannot read model file {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why the simplification step was skipped. Always recovered by falling back.
#[derive(Debug, Error)]
pub enum SimplifyError {
    #[error("scratch directory {} is unavailable: {source}", .path.display())]
    ScratchUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("simplification script not found at {}", .0.display())]
    ToolUnavailable(PathBuf),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("simplification exited with {}", describe_exit(.0))]
    NonZeroExit(Option<i32>),

    #[error("simplification timed out after {0:?}")]
    TimedOut(Duration),

    #[error("simplified file not created at {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("cannot read simplified file {}: {source}", .path.display())]
    OutputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of the tool runner itself.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect tool output: {0}")]
    Wait(#[source] io::Error),

    /// `stdout` / `stderr` hold whatever the process wrote before it was killed.
    #[error("process timed out after {after:?}")]
    TimedOut {
        after: Duration,
        stdout: String,
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
