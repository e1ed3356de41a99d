//! Acquirer - ドキュメント取得パイプライン
//!
//! # フロー
//! 1. 設定を解決（毎回）
//! 2. 無効なら元ファイルをそのまま読む（fast path）
//! 3. scratch directory を用意し、一時出力パスを決める
//! 4. スクリプトの存在確認
//! 5. timeout 付きで外部ツールを実行
//! 6. 出力ファイルの存在確認 → 読み込み
//! 7. どこかで失敗したら元ファイルに fallback（+ stale results directory の掃除）
//! 8. 一時ファイルは必ず削除を試みる
//!
//! 呼び出し元に返るエラーは `AcquireError::SourceUnreadable` だけです。

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use super::invoke::invoke_bounded;
use super::temp_artifact::TemporaryArtifact;
use crate::domain::{
    AcquireError, AcquisitionConfig, Document, DocumentOrigin, SimplifyError, ToolInvocation,
    ToolLayout,
};
use crate::ports::{Diagnostics, FileStore, IdGenerator, NoticeLevel, SettingsSource, ToolRunner};

/// Acquirer は開かれたモデルファイルから `Document` を作る
///
/// 状態を持たないので、`Arc<Acquirer>` を共有して複数のドキュメントを同時に取得できます。
pub struct Acquirer {
    pub(super) files: Arc<dyn FileStore>,
    pub(super) runner: Arc<dyn ToolRunner>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) settings: Arc<dyn SettingsSource>,
    pub(super) layout: ToolLayout,
    pub(super) diagnostics: Arc<dyn Diagnostics>,
}

impl Acquirer {
    pub fn diagnostics(&self) -> &dyn Diagnostics {
        &*self.diagnostics
    }

    pub fn layout(&self) -> &ToolLayout {
        &self.layout
    }

    /// Current settings combined with the install layout.
    pub fn resolve_config(&self) -> AcquisitionConfig {
        AcquisitionConfig::resolve(&self.settings.load(), &self.layout)
    }

    /// Acquire with freshly resolved settings.
    ///
    /// `backup` replaces the bytes read (crash-recovery reopen); the document
    /// is still identified by `source`.
    pub async fn acquire(
        &self,
        source: &Path,
        backup: Option<&Path>,
    ) -> Result<Document, AcquireError> {
        let config = self.resolve_config();
        self.acquire_with(source, backup, &config).await
    }

    pub async fn acquire_with(
        &self,
        source: &Path,
        backup: Option<&Path>,
        config: &AcquisitionConfig,
    ) -> Result<Document, AcquireError> {
        let d = self.diagnostics();
        d.line(&format!("Starting to load ONNX file: {}", source.display()));

        let input = backup.unwrap_or(source);
        d.line(&format!("Simplification enabled: {}", config.simplification_enabled));

        if !config.simplification_enabled {
            d.line("Simplification disabled, loading original file");
            let content = self.read_original(input).await?;
            d.line(&format!("Successfully loaded original file ({} bytes)", content.len()));
            return Ok(Document::new(source, content, DocumentOrigin::Original));
        }

        let artifact = TemporaryArtifact::new(&config.scratch_dir, self.ids.generate_artifact_id());
        d.line(&format!("Script path: {}", config.script_path.display()));
        d.line(&format!("Python path: {}", config.tool_path.display()));
        d.line(&format!("Input path: {}", input.display()));
        d.line(&format!("Temp file: {}", artifact.path().display()));

        let result = match self.simplify(input, &artifact, config).await {
            Ok(content) => {
                d.line(&format!("Using simplified file ({} bytes)", content.len()));
                d.notify(NoticeLevel::Info, "ONNX simplification succeeded");
                Ok(Document::new(source, content, DocumentOrigin::Simplified))
            }
            Err(err) => {
                d.line(&format!("Simplification failed: {err}, using original file"));
                let fallback = self.read_original(input).await;
                if fallback.is_ok() {
                    d.notify(
                        NoticeLevel::Warning,
                        &format!("ONNX simplification skipped ({err}), showing original model"),
                    );
                }
                self.purge_stale_results(config).await;
                fallback.map(|content| Document::new(source, content, DocumentOrigin::Original))
            }
        };

        artifact.release(&*self.files, d).await;

        if result.is_ok() {
            d.line("Document creation completed");
        }
        result
    }

    /// Steps that may fail without failing the acquisition.
    async fn simplify(
        &self,
        input: &Path,
        artifact: &TemporaryArtifact,
        config: &AcquisitionConfig,
    ) -> Result<Bytes, SimplifyError> {
        let d = self.diagnostics();

        self.files
            .create_dir_all(&config.scratch_dir)
            .await
            .map_err(|source| SimplifyError::ScratchUnavailable {
                path: config.scratch_dir.clone(),
                source,
            })?;

        if !self.files.exists(&config.script_path).await {
            d.line("Script not found, falling back to original file");
            return Err(SimplifyError::ToolUnavailable(config.script_path.clone()));
        }
        d.line("Script found");

        let invocation = ToolInvocation::simplify(
            &config.tool_path,
            &config.script_path,
            input,
            artifact.path(),
            config.timeouts.process(),
        );
        invoke_bounded(&*self.runner, &invocation, config.timeouts.overall(), d).await?;

        if !self.files.exists(artifact.path()).await {
            return Err(SimplifyError::OutputMissing(artifact.path().to_path_buf()));
        }

        self.files
            .read(artifact.path())
            .await
            .map_err(|source| SimplifyError::OutputUnreadable {
                path: artifact.path().to_path_buf(),
                source,
            })
    }

    async fn read_original(&self, input: &Path) -> Result<Bytes, AcquireError> {
        self.files.read(input).await.map_err(|source| {
            self.diagnostics
                .line(&format!("Failed to read {}: {source}", input.display()));
            AcquireError::SourceUnreadable {
                path: input.to_path_buf(),
                source,
            }
        })
    }

    /// Best-effort removal of what a failed tool run may have left behind.
    async fn purge_stale_results(&self, config: &AcquisitionConfig) {
        let Some(dir) = config.stale_results_dir.as_deref() else {
            return;
        };
        if !self.files.exists(dir).await {
            return;
        }
        match self.files.remove_dir_all(dir).await {
            Ok(()) => self
                .diagnostics
                .line("Cleaned up ONNX analysis results directory"),
            Err(e) => self.diagnostics.line(&format!(
                "Failed to clean up ONNX analysis results {}: {e}",
                dir.display()
            )),
        }
    }
}
