//! qtron-core
//!
//! ONNX モデルビューアのドキュメント取得パイプライン。
//!
//! 開かれたモデルファイルを、必要なら外部の簡略化ツールに通し、
//! 表示する 1 つの不変バイト列（`Document`）にします。
//! ツールが使えない・失敗する・時間切れになる場合は、必ず元ファイルに fallback します。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Document, AcquisitionConfig, ids, errors, ToolOutput）
//! - **ports**: 抽象化レイヤー（FileStore, ToolRunner, Diagnostics, SettingsSource, IdGenerator, Clock）
//! - **app**: パイプライン本体（Acquirer, AcquirerBuilder, invoke_bounded, TemporaryArtifact）
//! - **impls**: 実装（TokioFileStore, ProcessToolRunner, TracingDiagnostics, JsonFileSettings など）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{Acquirer, AcquirerBuilder};
pub use domain::{AcquireError, AcquisitionConfig, Document, DocumentOrigin, Settings, ToolLayout};
