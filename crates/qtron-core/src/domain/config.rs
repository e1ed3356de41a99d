//! Config - 設定の解決
//!
//! ユーザー設定（`Settings`）とインストール配置（`ToolLayout`）から、
//! acquisition 1 回分の `AcquisitionConfig` を作ります。
//!
//! # 設計原則
//! - acquisition のたびに新しく解決する（永続化しない）
//! - timeout と stale results directory は定数（ユーザー設定にはしない）

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Interpreter used when `pythonPath` is unset or empty. Resolved through `PATH`.
pub const DEFAULT_TOOL_PATH: &str = "python";

/// Per-process timeout handed to the tool runner.
pub const PROCESS_TIMEOUT: Duration = Duration::from_millis(7_000);

/// Outer safety-net timeout around the whole invocation.
pub const OVERALL_TIMEOUT: Duration = Duration::from_millis(8_000);

/// Directory (under the home directory) the simplification script may leave behind.
pub const STALE_RESULTS_DIR_NAME: &str = ".onnx_analysis_results";

const SCRIPT_RELATIVE_PATH: [&str; 2] = ["scripts", "simplify_onnx.py"];
const SCRATCH_DIR_NAME: &str = "tmp";

/// User-facing settings (`qtron.*` in the host).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub enable_simplification: bool,
    pub python_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_simplification: true,
            python_path: None,
        }
    }
}

impl Settings {
    /// `pythonPath` with empty strings treated as unset.
    pub fn tool_path(&self) -> PathBuf {
        match self.python_path.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => PathBuf::from(DEFAULT_TOOL_PATH),
        }
    }
}

/// Where the simplification script and scratch directory live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLayout {
    pub script_path: PathBuf,
    pub scratch_dir: PathBuf,
}

impl ToolLayout {
    /// Standard layout below an install root: `scripts/simplify_onnx.py` and `tmp/`.
    pub fn from_install_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            script_path: SCRIPT_RELATIVE_PATH.iter().fold(root.to_path_buf(), |p, c| p.join(c)),
            scratch_dir: root.join(SCRATCH_DIR_NAME),
        }
    }
}

/// Timeouts for one bounded invocation.
///
/// `process` must be strictly shorter than `overall` so the runner's own
/// timeout fires first and the outer timer stays a safety net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationTimeouts {
    process: Duration,
    overall: Duration,
}

impl InvocationTimeouts {
    /// Returns `None` unless `process < overall`.
    pub fn new(process: Duration, overall: Duration) -> Option<Self> {
        (process < overall).then_some(Self { process, overall })
    }

    pub fn process(&self) -> Duration {
        self.process
    }

    pub fn overall(&self) -> Duration {
        self.overall
    }
}

impl Default for InvocationTimeouts {
    fn default() -> Self {
        Self {
            process: PROCESS_TIMEOUT,
            overall: OVERALL_TIMEOUT,
        }
    }
}

/// Resolved settings for one acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    pub simplification_enabled: bool,
    pub tool_path: PathBuf,
    pub script_path: PathBuf,
    pub scratch_dir: PathBuf,
    pub stale_results_dir: Option<PathBuf>,
    pub timeouts: InvocationTimeouts,
}

impl AcquisitionConfig {
    /// Combine settings and layout with the fixed constants.
    pub fn resolve(settings: &Settings, layout: &ToolLayout) -> Self {
        Self {
            simplification_enabled: settings.enable_simplification,
            tool_path: settings.tool_path(),
            script_path: layout.script_path.clone(),
            scratch_dir: layout.scratch_dir.clone(),
            stale_results_dir: dirs::home_dir().map(|home| home.join(STALE_RESULTS_DIR_NAME)),
            timeouts: InvocationTimeouts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn settings_default_enables_simplification() {
        let s = Settings::default();
        assert!(s.enable_simplification);
        assert_eq!(s.tool_path(), PathBuf::from("python"));
    }

    #[test]
    fn settings_parse_camel_case_with_missing_keys() {
        let s: Settings = serde_json::from_str(r#"{"pythonPath": "/usr/bin/python3"}"#).unwrap();
        assert!(s.enable_simplification);
        assert_eq!(s.tool_path(), PathBuf::from("/usr/bin/python3"));

        let s: Settings = serde_json::from_str(r#"{"enableSimplification": false}"#).unwrap();
        assert!(!s.enable_simplification);
    }

    #[rstest]
    #[case::unset(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("   "))]
    fn blank_python_path_falls_back_to_default(#[case] python_path: Option<&str>) {
        let s = Settings {
            enable_simplification: true,
            python_path: python_path.map(str::to_string),
        };
        assert_eq!(s.tool_path(), PathBuf::from(DEFAULT_TOOL_PATH));
    }

    #[test]
    fn layout_from_install_root() {
        let layout = ToolLayout::from_install_root("/opt/qtron");
        assert_eq!(layout.script_path, PathBuf::from("/opt/qtron/scripts/simplify_onnx.py"));
        assert_eq!(layout.scratch_dir, PathBuf::from("/opt/qtron/tmp"));
    }

    #[test]
    fn default_timeouts_keep_process_shorter() {
        let t = InvocationTimeouts::default();
        assert_eq!(t.process(), Duration::from_secs(7));
        assert_eq!(t.overall(), Duration::from_secs(8));
        assert!(t.process() < t.overall());
    }

    #[rstest]
    #[case::equal(100, 100)]
    #[case::inverted(200, 100)]
    fn timeouts_reject_process_not_shorter(#[case] process_ms: u64, #[case] overall_ms: u64) {
        let t = InvocationTimeouts::new(
            Duration::from_millis(process_ms),
            Duration::from_millis(overall_ms),
        );
        assert!(t.is_none());
    }

    #[test]
    fn resolve_uses_constants_and_layout() {
        let settings = Settings {
            enable_simplification: false,
            python_path: Some("py".to_string()),
        };
        let layout = ToolLayout::from_install_root("/opt/qtron");

        let config = AcquisitionConfig::resolve(&settings, &layout);

        assert!(!config.simplification_enabled);
        assert_eq!(config.tool_path, PathBuf::from("py"));
        assert_eq!(config.script_path, layout.script_path);
        assert_eq!(config.timeouts, InvocationTimeouts::default());
        if let Some(dir) = config.stale_results_dir {
            assert!(dir.ends_with(STALE_RESULTS_DIR_NAME));
        }
    }
}
