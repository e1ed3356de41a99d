//! AcquirerBuilder - Acquirer の構築とワイヤリング
//!
//! # 起動時検証（Fail-fast）
//! - `layout` と `diagnostics` はホストが必ず渡す（出力チャネルの寿命はホストが持つ）
//! - それ以外の port は本番用の実装がデフォルト

use std::sync::Arc;

use super::acquisition::Acquirer;
use crate::domain::ToolLayout;
use crate::impls::{ProcessToolRunner, StaticSettings, TokioFileStore};
use crate::ports::{
    Diagnostics, FileStore, IdGenerator, SettingsSource, SystemClock, ToolRunner, UlidGenerator,
};

/// AcquirerBuilder は Acquirer を構築
///
/// # 使用例
/// ```ignore
/// let acquirer = AcquirerBuilder::new()
///     .layout(ToolLayout::from_install_root(root))
///     .settings(Arc::new(JsonFileSettings::new(path, diagnostics.clone())))
///     .diagnostics(diagnostics)
///     .build()?;
/// ```
#[derive(Default)]
pub struct AcquirerBuilder {
    files: Option<Arc<dyn FileStore>>,
    runner: Option<Arc<dyn ToolRunner>>,
    ids: Option<Arc<dyn IdGenerator>>,
    settings: Option<Arc<dyn SettingsSource>>,
    layout: Option<ToolLayout>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

/// BuildError は Acquirer 構築時のエラー
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing required dependency: {0}. It must be provided by the host.")]
    Missing(&'static str),
}

impl AcquirerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(mut self, files: Arc<dyn FileStore>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn runner(mut self, runner: Arc<dyn ToolRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn layout(mut self, layout: ToolLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn build(self) -> Result<Acquirer, BuildError> {
        let layout = self.layout.ok_or(BuildError::Missing("layout"))?;
        let diagnostics = self.diagnostics.ok_or(BuildError::Missing("diagnostics"))?;

        Ok(Acquirer {
            files: self.files.unwrap_or_else(|| Arc::new(TokioFileStore::new())),
            runner: self.runner.unwrap_or_else(|| Arc::new(ProcessToolRunner::new())),
            ids: self
                .ids
                .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock))),
            settings: self
                .settings
                .unwrap_or_else(|| Arc::new(StaticSettings::default())),
            layout,
            diagnostics,
        })
    }
}
