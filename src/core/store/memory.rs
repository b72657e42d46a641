//! 内存存储实现
//!
//! 数据仅在内存中，重启后丢失，适合测试

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Message;

use super::TranscriptStore;

/// 内存存储
pub struct MemoryStore {
    messages: RwLock<Option<Vec<Message>>>,
}

impl MemoryStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(None),
        }
    }

    /// 使用已有记录创建
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(Some(messages)),
        }
    }

    /// 是否存在已保存的记录
    pub async fn is_saved(&self) -> bool {
        self.messages.read().await.is_some()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Message>> {
        let stored = self.messages.read().await;
        Ok(stored.clone().unwrap_or_default())
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        let mut stored = self.messages.write().await;
        *stored = Some(messages.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut stored = self.messages.write().await;
        *stored = None;
        Ok(())
    }
}
