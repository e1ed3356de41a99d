//! Diagnostics port - 診断ログと通知
//!
//! 出力チャネルはホストが所有し、acquisition には依存として渡します。

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Diagnostics は acquisition の判断ポイントを記録する
///
/// - `line`: 出力チャネルへの 1 行（スクリプトの有無、時間、バイト数、失敗理由）
/// - `notify`: ユーザーに見せる通知（成功 / fallback）
pub trait Diagnostics: Send + Sync {
    fn line(&self, message: &str);

    fn notify(&self, level: NoticeLevel, message: &str);
}
