//! ProcessToolRunner - `tokio::process` による外部ツール実行
//!
//! # 実装詳細
//! - stdin は閉じる、stdout / stderr は別タスクで読み続けて共有バッファに溜める
//! - timeout で kill した場合も、それまでに読めた出力は `InvocationError::TimedOut` に載せる
//! - `kill_on_drop(true)`: runner の future ごと捨てられても子プロセスは残らない
//! - 出力は UTF-8 lossy で文字列化（ログ用途のみ）

use std::io;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::domain::{InvocationError, ToolInvocation, ToolOutput};
use crate::ports::ToolRunner;

const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

impl ProcessToolRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| InvocationError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let stdout = CapturedStream::spawn(child.stdout.take());
        let stderr = CapturedStream::spawn(child.stderr.take());

        match timeout(invocation.timeout, child.wait()).await {
            Ok(Ok(status)) => Ok(ToolOutput {
                exit_code: status.code(),
                stdout: stdout.finish().await.map_err(InvocationError::Wait)?,
                stderr: stderr.finish().await.map_err(InvocationError::Wait)?,
            }),
            Ok(Err(e)) => Err(InvocationError::Wait(e)),
            Err(_) => {
                // kill できなくても drop 時に再度 kill される
                let _ = child.start_kill();
                Err(InvocationError::TimedOut {
                    after: invocation.timeout,
                    stdout: stdout.abandon(),
                    stderr: stderr.abandon(),
                })
            }
        }
    }
}

/// One child pipe drained into a shared buffer by a background task.
///
/// The buffer stays readable after the task is aborted, so a killed process
/// still reports what it printed.
struct CapturedStream {
    buffer: Arc<Mutex<Vec<u8>>>,
    reader: Option<JoinHandle<io::Result<()>>>,
}

impl CapturedStream {
    fn spawn<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let reader = pipe.map(|pipe| tokio::spawn(drain(pipe, Arc::clone(&buffer))));
        Self { buffer, reader }
    }

    /// Wait for EOF and return everything read.
    async fn finish(mut self) -> io::Result<String> {
        if let Some(reader) = self.reader.take() {
            reader.await.map_err(io::Error::other)??;
        }
        Ok(self.snapshot())
    }

    /// Stop reading and return what has been read so far.
    fn abandon(mut self) -> String {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.snapshot()
    }

    fn snapshot(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

async fn drain<R>(mut pipe: R, buffer: Arc<Mutex<Vec<u8>>>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = pipe.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(&chunk[..n]);
    }
}
