use async_trait::async_trait;

use crate::errors::Result;

/// 文本补全能力
///
/// `Ok(None)` 表示上游正常响应但没有文本。
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<Option<String>>;

    /// provider 名称（用于日志）
    fn name(&self) -> &'static str;
}
