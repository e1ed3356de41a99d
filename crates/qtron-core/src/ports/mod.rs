//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」です。acquisition は外部（ファイルシステム、
//! 外部プロセス、ホストの出力チャネル、設定）にこれらの trait 経由でのみ触れます。

pub mod clock;
pub mod diagnostics;
pub mod file_store;
pub mod id_generator;
pub mod settings;
pub mod tool_runner;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::diagnostics::{Diagnostics, NoticeLevel};
pub use self::file_store::FileStore;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::settings::SettingsSource;
pub use self::tool_runner::ToolRunner;
