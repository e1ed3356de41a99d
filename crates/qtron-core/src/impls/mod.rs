//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **TokioFileStore**: ローカルファイルシステム
//! - **ProcessToolRunner**: 外部プロセス実行（timeout 付き）
//! - **TracingDiagnostics / RecordingDiagnostics**: 出力チャネル
//! - **StaticSettings / JsonFileSettings**: ユーザー設定

pub mod diagnostics;
pub mod local_fs;
pub mod process_runner;
pub mod settings;

pub use self::diagnostics::{DEFAULT_CHANNEL, RecordingDiagnostics, TracingDiagnostics};
pub use self::local_fs::TokioFileStore;
pub use self::process_runner::ProcessToolRunner;
pub use self::settings::{JsonFileSettings, StaticSettings};
