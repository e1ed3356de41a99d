//! TokioFileStore - ローカルファイルシステム実装
//!
//! `tokio::fs` はブロッキング I/O を blocking pool に逃がすので、
//! acquisition のタスクを止めません。

use std::io;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::ports::FileStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileStore;

impl TokioFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for TokioFileStore {
    async fn read(&self, path: &Path) -> io::Result<Bytes> {
        tokio::fs::read(path).await.map(Bytes::from)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_dir_all(path).await
    }
}
