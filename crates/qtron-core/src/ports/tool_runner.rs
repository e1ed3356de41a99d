//! ToolRunner port - 外部ツールの実行
//!
//! # 実装
//! - ProcessToolRunner（`tokio::process`）

use async_trait::async_trait;

use crate::domain::{InvocationError, ToolInvocation, ToolOutput};

/// ToolRunner は外部プロセスを 1 回実行して結果を返す
///
/// # 契約
/// - `invocation.timeout` を過ぎたら `InvocationError::TimedOut` で完了する
/// - 終了コードが 0 以外でも `Ok(ToolOutput)` を返す（判定は呼び出し側）
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError>;
}
