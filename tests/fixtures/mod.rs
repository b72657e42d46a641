//! 测试 Fixtures
//!
//! 提供测试数据和模拟对象
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pilates_faq::application::{ChatSession, FaqAssistant};
use pilates_faq::core::chat::ChatModel;
use pilates_faq::core::chunker::TextSplitter;
use pilates_faq::core::retrieval::{EmbeddingProvider, VectorIndex};
use pilates_faq::core::store::{MemoryStore, TranscriptStore};
use pilates_faq::domain::Message;
use pilates_faq::infrastructure::store::JsonFileStore;

/// 测试用的规章文档
pub const STUDIO_POLICY: &str = "평일 운영시간은 오전 7시부터 오후 10시까지입니다.

주말에는 오전 9시부터 오후 2시까지 오전 수업만 운영합니다.

공휴일에는 스튜디오가 휴무입니다.

환불은 수강 시작 전까지 전액 가능합니다.";

const KEYWORDS: [&str; 5] = ["평일", "주말", "공휴일", "환불", "수업"];

/// 按关键词出现与否生成向量
pub struct KeywordEmbedding;

#[async_trait]
impl EmbeddingProvider for KeywordEmbedding {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn embed(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                KEYWORDS
                    .iter()
                    .map(|k| if t.contains(k) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect())
    }
}

/// 记录提示词并返回固定回答的模型
pub struct ScriptedChat {
    answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedChat {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// 每次调用都失败
    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => anyhow::bail!("upstream unavailable"),
        }
    }
}

/// 基于 STUDIO_POLICY 建立检索索引
pub async fn policy_index() -> Arc<VectorIndex> {
    let splitter = TextSplitter::new(150, 100).unwrap();
    let chunks = splitter.split(STUDIO_POLICY);
    Arc::new(
        VectorIndex::build(chunks, Arc::new(KeywordEmbedding))
            .await
            .unwrap(),
    )
}

/// 清空总是失败的存储，其余操作委托给内存存储
#[derive(Default)]
pub struct StuckStore {
    inner: MemoryStore,
}

#[async_trait]
impl TranscriptStore for StuckStore {
    async fn load(&self) -> anyhow::Result<Vec<Message>> {
        self.inner.load().await
    }

    async fn save(&self, messages: &[Message]) -> anyhow::Result<()> {
        self.inner.save(messages).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        anyhow::bail!("permission denied")
    }
}

pub async fn assistant(chat: Arc<ScriptedChat>) -> Arc<FaqAssistant> {
    Arc::new(FaqAssistant::new(policy_index().await, chat, 3))
}

/// 使用 JSON 文件存储打开会话
pub async fn file_session(path: &Path, chat: Arc<ScriptedChat>) -> ChatSession {
    let store: Arc<dyn TranscriptStore> = Arc::new(JsonFileStore::new(path));
    ChatSession::open(store, assistant(chat).await).await.unwrap()
}
