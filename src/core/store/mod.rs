//! 对话记录存储接口
//!
//! 对话记录始终整体读写：保存即完全覆盖，清空即删除

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::Message;

pub mod memory;

pub use memory::MemoryStore;

/// 对话记录存储
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// 读取全部消息，不存在时返回空列表
    async fn load(&self) -> Result<Vec<Message>>;

    /// 保存全部消息（完全覆盖）
    async fn save(&self, messages: &[Message]) -> Result<()>;

    /// 删除已保存的记录，不存在时什么也不做
    async fn clear(&self) -> Result<()>;
}
