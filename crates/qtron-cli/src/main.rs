use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use qtron_core::app::AcquirerBuilder;
use qtron_core::domain::{Settings, ToolLayout};
use qtron_core::impls::{JsonFileSettings, StaticSettings, TracingDiagnostics};
use qtron_core::ports::{Diagnostics, SettingsSource};

/// Load an ONNX model the way the viewer does (simplify, or fall back to the original).
#[derive(Debug, Parser)]
#[command(name = "qtron", version)]
struct Cli {
    /// Model file to open.
    input: PathBuf,

    /// Read bytes from this file instead of INPUT (crash-recovery reopen).
    #[arg(long)]
    backup: Option<PathBuf>,

    /// JSON settings file (`enableSimplification`, `pythonPath`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding `scripts/simplify_onnx.py` and the `tmp/` scratch directory.
    #[arg(long, default_value = ".")]
    install_root: PathBuf,

    /// Skip simplification regardless of settings.
    #[arg(long)]
    no_simplify: bool,

    /// Write the resulting document bytes here.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qtron_core=info".parse()?)
                .add_directive("qtron=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // 出力チャネルはホスト（この CLI）が所有する
    let diagnostics: Arc<dyn Diagnostics> = Arc::new(TracingDiagnostics::default());
    diagnostics.line("QTron activated");

    let settings: Arc<dyn SettingsSource> = match (&cli.settings, cli.no_simplify) {
        (_, true) => Arc::new(StaticSettings::new(Settings {
            enable_simplification: false,
            python_path: None,
        })),
        (Some(path), false) => Arc::new(JsonFileSettings::new(path, Arc::clone(&diagnostics))),
        (None, false) => Arc::new(StaticSettings::default()),
    };

    let acquirer = AcquirerBuilder::new()
        .layout(ToolLayout::from_install_root(&cli.install_root))
        .settings(settings)
        .diagnostics(Arc::clone(&diagnostics))
        .build()?;

    let document = acquirer
        .acquire(&cli.input, cli.backup.as_deref())
        .await
        .with_context(|| format!("failed to open {}", cli.input.display()))?;

    tracing::info!(
        source = %document.source().display(),
        origin = ?document.origin(),
        bytes = document.len(),
        "document ready"
    );

    if let Some(output) = &cli.output {
        tokio::fs::write(output, document.content())
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    document.dispose(&*diagnostics);
    Ok(())
}
