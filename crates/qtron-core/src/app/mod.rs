//! App - アプリケーション層
//!
//! ports を組み合わせてドキュメント取得パイプラインを実装します。
//!
//! # 主要コンポーネント
//! - **AcquirerBuilder**: port のワイヤリングと起動時検証
//! - **Acquirer**: 設定解決 → スクリプト確認 → 実行 → 検証 / fallback → 後片付け
//! - **invoke_bounded**: 外部ツール実行と timeout の競合
//! - **TemporaryArtifact**: 一時出力ファイルのスコープ管理

pub mod acquisition;
pub mod builder;
pub mod invoke;
pub mod temp_artifact;

pub use self::acquisition::Acquirer;
pub use self::builder::{AcquirerBuilder, BuildError};
pub use self::invoke::invoke_bounded;
pub use self::temp_artifact::TemporaryArtifact;
