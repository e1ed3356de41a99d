//! TemporaryArtifact - 一時出力ファイルのスコープ管理
//!
//! acquisition 1 回につき 1 つ。どの経路で抜けても削除を試みます。
//!
//! # 解放の二段構え
//! - `release().await`: 通常経路。FileStore 経由で削除し、結果をログに残す
//! - `Drop`: acquisition の future ごと捨てられた場合だけ、同期的に削除を試みる

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::ArtifactId;
use crate::ports::{Diagnostics, FileStore};

const ARTIFACT_EXTENSION: &str = "onnx";

#[derive(Debug)]
pub struct TemporaryArtifact {
    path: PathBuf,
    released: bool,
}

impl TemporaryArtifact {
    /// `<scratch_dir>/onnxsim_<ULID>.onnx`. Nothing is created on disk.
    pub fn new(scratch_dir: &Path, id: ArtifactId) -> Self {
        Self {
            path: scratch_dir.join(format!("{id}.{ARTIFACT_EXTENSION}")),
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the artifact. Failures are logged and otherwise ignored.
    ///
    /// A file that was never written is not a failure.
    pub async fn release(mut self, files: &dyn FileStore, diagnostics: &dyn Diagnostics) {
        self.released = true;
        match files.remove_file(&self.path).await {
            Ok(()) => diagnostics.line("Cleaned up temp file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => diagnostics.line(&format!(
                "Failed to clean up temp file {}: {e}",
                self.path.display()
            )),
        }
    }
}

impl Drop for TemporaryArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed abandoned temp artifact"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove abandoned temp artifact")
            }
        }
    }
}
