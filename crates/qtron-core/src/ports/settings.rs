//! SettingsSource port - ユーザー設定の取得
//!
//! acquisition のたびに `load()` を呼ぶので、設定変更は次に開くドキュメントから効きます。

use crate::domain::Settings;

pub trait SettingsSource: Send + Sync {
    fn load(&self) -> Settings;
}
