//! 对话会话
//!
//! 持有内存中的对话记录，并在每轮问答后整体写回存储

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::assistant::FaqAssistant;
use crate::core::store::TranscriptStore;
use crate::domain::Message;
use crate::errors::{FaqError, Result};

/// 对话会话
pub struct ChatSession {
    messages: Mutex<Vec<Message>>,
    store: Arc<dyn TranscriptStore>,
    assistant: Arc<FaqAssistant>,
}

impl ChatSession {
    /// 从存储中恢复对话记录
    pub async fn open(store: Arc<dyn TranscriptStore>, assistant: Arc<FaqAssistant>) -> Result<Self> {
        let messages = store
            .load()
            .await
            .map_err(|e| FaqError::Storage(format!("{:#}", e)))?;
        info!(count = messages.len(), "transcript restored");

        Ok(Self {
            messages: Mutex::new(messages),
            store,
            assistant,
        })
    }

    /// 当前对话记录快照
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    /// 提交问题
    ///
    /// 空白问题直接忽略，返回 `Ok(None)`；其他问题按原文保存。回答失败时
    /// 用户消息保留在内存中，但不会写入存储。
    pub async fn submit(&self, query: &str) -> Result<Option<String>> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        // 串行处理，保证追加顺序和写文件不交错
        let mut messages = self.messages.lock().await;
        messages.push(Message::user(query));

        let answer = match self.assistant.answer(query).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "answer failed");
                return Err(e);
            }
        };
        messages.push(Message::assistant(answer.clone()));

        self.store
            .save(&messages)
            .await
            .map_err(|e| FaqError::Storage(format!("{:#}", e)))?;

        Ok(Some(answer))
    }

    /// 清空内存和存储中的对话记录
    ///
    /// 先删存储；删除失败时内存中的记录保持不变。
    pub async fn reset(&self) -> Result<()> {
        let mut messages = self.messages.lock().await;
        self.store
            .clear()
            .await
            .map_err(|e| FaqError::Storage(format!("{:#}", e)))?;
        messages.clear();
        info!("transcript reset");
        Ok(())
    }
}
