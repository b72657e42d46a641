//! 对话模型接口

use anyhow::Result;
use async_trait::async_trait;

/// 对话模型
///
/// 输入完整提示词，返回模型的文本回答
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 模型名称
    fn model(&self) -> &str;

    /// 单轮补全
    async fn complete(&self, prompt: &str) -> Result<String>;
}
