//! Bounded invocation - 外部ツール実行と timeout の競合
//!
//! # 二重の timeout
//! - 内側: `ToolInvocation::timeout`（ToolRunner がプロセスを kill する）
//! - 外側: `overall`（runner が戻らない場合の安全網）
//!
//! 外側は `tokio::time::timeout` なので、runner が先に終われば timer は future ごと破棄され、
//! 後から発火することはありません。負けた側の結果は捨てられます。

use std::time::{Duration, Instant};

use tokio::time::timeout;

use crate::domain::{InvocationError, SimplifyError, ToolInvocation, ToolOutput};
use crate::ports::{Diagnostics, ToolRunner};

const EMPTY_STREAM: &str = "<empty>";

/// Run the tool once, racing the runner against `overall`.
///
/// Non-zero exit, runner errors and both timeouts all come back as
/// `SimplifyError`; stdout and stderr are logged in every settled case.
pub async fn invoke_bounded(
    runner: &dyn ToolRunner,
    invocation: &ToolInvocation,
    overall: Duration,
    diagnostics: &dyn Diagnostics,
) -> Result<ToolOutput, SimplifyError> {
    diagnostics.line("Starting simplification process...");
    let started = Instant::now();

    let settled = match timeout(overall, runner.run(invocation)).await {
        Ok(settled) => settled,
        Err(_) => {
            diagnostics.line(&format!("Simplification timed out after {overall:?}"));
            return Err(SimplifyError::TimedOut(overall));
        }
    };

    diagnostics.line(&format!("Command completed in {:?}", started.elapsed()));

    match settled {
        Ok(output) => {
            log_streams(diagnostics, &output.stdout, &output.stderr);
            if output.succeeded() {
                diagnostics.line("Simplification command succeeded");
                Ok(output)
            } else {
                let err = SimplifyError::NonZeroExit(output.exit_code);
                diagnostics.line(&format!("Error: {err}"));
                Err(err)
            }
        }
        Err(InvocationError::TimedOut {
            after,
            stdout,
            stderr,
        }) => {
            // kill される前に書かれた分
            log_streams(diagnostics, &stdout, &stderr);
            diagnostics.line(&format!("Error: process timed out after {after:?}"));
            Err(SimplifyError::TimedOut(after))
        }
        Err(e) => {
            log_streams(diagnostics, "", "");
            diagnostics.line(&format!("Error: {e}"));
            Err(SimplifyError::Invocation(e))
        }
    }
}

fn log_streams(diagnostics: &dyn Diagnostics, stdout: &str, stderr: &str) {
    let or_empty = |s: &str| if s.trim().is_empty() { EMPTY_STREAM.to_string() } else { s.trim_end().to_string() };
    diagnostics.line(&format!("stdout: {}", or_empty(stdout)));
    diagnostics.line(&format!("stderr: {}", or_empty(stderr)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::RecordingDiagnostics;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct Fixed(Result<ToolOutput, fn() -> InvocationError>);

    #[async_trait]
    impl ToolRunner for Fixed {
        async fn run(&self, _invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError> {
            match &self.0 {
                Ok(out) => Ok(out.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    struct Hangs;

    #[async_trait]
    impl ToolRunner for Hangs {
        async fn run(&self, _invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError> {
            std::future::pending().await
        }
    }

    fn invocation() -> ToolInvocation {
        ToolInvocation::simplify("python", "s.py", "in.onnx", "out.onnx", Duration::from_millis(50))
    }

    #[tokio::test]
    async fn success_logs_streams() {
        let d = RecordingDiagnostics::new();
        let runner = Fixed(Ok(ToolOutput::success().with_stdout("[OK] simplified\n")));

        let out = invoke_bounded(&runner, &invocation(), Duration::from_secs(1), &d)
            .await
            .unwrap();

        assert!(out.succeeded());
        assert!(d.contains("stdout: [OK] simplified"));
        assert!(d.contains("stderr: <empty>"));
        assert!(d.contains("Simplification command succeeded"));
    }

    #[tokio::test]
    async fn non_zero_exit_is_failure() {
        let d = RecordingDiagnostics::new();
        let runner = Fixed(Ok(ToolOutput::failure(1).with_stderr("No module named onnxsim")));

        let err = invoke_bounded(&runner, &invocation(), Duration::from_secs(1), &d)
            .await
            .unwrap_err();

        assert!(matches!(err, SimplifyError::NonZeroExit(Some(1))));
        assert!(d.contains("stderr: No module named onnxsim"));
    }

    #[tokio::test]
    async fn runner_timeout_maps_to_timed_out() {
        let d = RecordingDiagnostics::new();
        let runner = Fixed(Err(|| InvocationError::TimedOut {
            after: Duration::from_millis(50),
            stdout: String::new(),
            stderr: String::new(),
        }));

        let err = invoke_bounded(&runner, &invocation(), Duration::from_secs(1), &d)
            .await
            .unwrap_err();

        assert!(matches!(err, SimplifyError::TimedOut(t) if t == Duration::from_millis(50)));
        assert!(d.contains("stdout: <empty>"));
    }

    #[tokio::test]
    async fn runner_timeout_logs_output_written_before_kill() {
        let d = RecordingDiagnostics::new();
        let runner = Fixed(Err(|| InvocationError::TimedOut {
            after: Duration::from_millis(500),
            stdout: "Loading model: progress 50%\n".to_string(),
            stderr: "warn: slow\n".to_string(),
        }));

        let err = invoke_bounded(&runner, &invocation(), Duration::from_secs(1), &d)
            .await
            .unwrap_err();

        assert!(matches!(err, SimplifyError::TimedOut(_)));
        assert!(d.contains("stdout: Loading model: progress 50%"));
        assert!(d.contains("stderr: warn: slow"));
        assert!(!d.contains("<empty>"));
        assert!(d.contains("Error: process timed out after 500ms"));
    }

    #[tokio::test]
    async fn spawn_error_is_invocation_failure() {
        let d = RecordingDiagnostics::new();
        let runner = Fixed(Err(|| InvocationError::Spawn {
            program: PathBuf::from("python"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }));

        let err = invoke_bounded(&runner, &invocation(), Duration::from_secs(1), &d)
            .await
            .unwrap_err();

        assert!(matches!(err, SimplifyError::Invocation(InvocationError::Spawn { .. })));
    }

    #[tokio::test]
    async fn outer_timer_fires_when_runner_never_settles() {
        let d = RecordingDiagnostics::new();
        let started = Instant::now();

        let err = invoke_bounded(&Hangs, &invocation(), Duration::from_millis(100), &d)
            .await
            .unwrap_err();

        assert!(matches!(err, SimplifyError::TimedOut(t) if t == Duration::from_millis(100)));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(d.contains("Simplification timed out"));
        assert!(!d.contains("Command completed"));
    }
}
