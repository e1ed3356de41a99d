//! SettingsSource 実装
//!
//! - **StaticSettings**: 固定値（テスト用、ホストが自前で設定を持つ場合）
//! - **JsonFileSettings**: JSON ファイルを毎回読み直す

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Settings;
use crate::ports::{Diagnostics, SettingsSource};

#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    settings: Settings,
}

impl StaticSettings {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsSource for StaticSettings {
    fn load(&self) -> Settings {
        self.settings.clone()
    }
}

/// Reads `{"enableSimplification": ..., "pythonPath": ...}` on every load.
///
/// A missing file means defaults. An unreadable or malformed file also
/// means defaults, with a diagnostic line.
pub struct JsonFileSettings {
    path: PathBuf,
    diagnostics: Arc<dyn Diagnostics>,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for JsonFileSettings {
    fn load(&self) -> Settings {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                self.diagnostics.line(&format!(
                    "Failed to read settings {}: {e}, using defaults",
                    self.path.display()
                ));
                return Settings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            self.diagnostics.line(&format!(
                "Invalid settings {}: {e}, using defaults",
                self.path.display()
            ));
            Settings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::RecordingDiagnostics;

    #[test]
    fn static_settings_returns_copy() {
        let s = Settings {
            enable_simplification: false,
            python_path: None,
        };
        assert_eq!(StaticSettings::new(s.clone()).load(), s);
    }

    #[test]
    fn json_settings_reread_on_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let source = JsonFileSettings::new(&path, diagnostics.clone());

        assert_eq!(source.load(), Settings::default());

        std::fs::write(&path, r#"{"enableSimplification": false, "pythonPath": "python3"}"#).unwrap();
        let loaded = source.load();
        assert!(!loaded.enable_simplification);
        assert_eq!(loaded.python_path.as_deref(), Some("python3"));

        std::fs::write(&path, r#"{"enableSimplification": true}"#).unwrap();
        assert!(source.load().enable_simplification);
        assert!(diagnostics.lines().is_empty());
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let diagnostics = Arc::new(RecordingDiagnostics::new());

        let loaded = JsonFileSettings::new(&path, diagnostics.clone()).load();

        assert_eq!(loaded, Settings::default());
        assert!(diagnostics.contains("Invalid settings"));
    }
}
