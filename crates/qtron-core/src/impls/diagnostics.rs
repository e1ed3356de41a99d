//! Diagnostics 実装
//!
//! - **TracingDiagnostics**: `tracing` に流す（CLI などの本番用）
//! - **RecordingDiagnostics**: メモリに貯める（テスト用、独自の出力チャネルを描くホスト用）

use std::sync::Mutex;

use crate::ports::{Diagnostics, NoticeLevel};

/// Default output channel tag.
pub const DEFAULT_CHANNEL: &str = "QTron";

/// Forwards every line to `tracing` under a channel tag.
#[derive(Debug, Clone)]
pub struct TracingDiagnostics {
    channel: String,
}

impl TracingDiagnostics {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }
}

impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL)
    }
}

impl Diagnostics for TracingDiagnostics {
    fn line(&self, message: &str) {
        tracing::info!(channel = %self.channel, "[{}] {}", self.channel, message);
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(channel = %self.channel, notice = true, "{message}"),
            NoticeLevel::Warning => {
                tracing::warn!(channel = %self.channel, notice = true, "{message}")
            }
        }
    }
}

/// Keeps tagged lines and notices in memory.
#[derive(Debug)]
pub struct RecordingDiagnostics {
    channel: String,
    lines: Mutex<Vec<String>>,
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::with_channel(DEFAULT_CHANNEL)
    }

    pub fn with_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            lines: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// True if any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|l| l.contains(needle))
    }
}

impl Default for RecordingDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn line(&self, message: &str) {
        let line = format!("[{}] {}", self.channel, message);
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).push(line);
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, message.to_string()));
    }
}
