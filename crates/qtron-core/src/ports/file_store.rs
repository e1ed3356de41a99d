//! FileStore port - ファイルシステムの抽象化
//!
//! acquisition が触るファイル操作はすべてここを通ります。
//! テストでは失敗を注入した実装に差し替えます。

use std::io;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

/// FileStore は acquisition に必要なファイル操作を提供
///
/// # 設計原則
/// - すべて async（ホストの応答性をブロックしない）
/// - エラーは `io::Error` のまま返し、分類は呼び出し側で行う
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn read(&self, path: &Path) -> io::Result<Bytes>;

    async fn exists(&self, path: &Path) -> bool;

    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}
