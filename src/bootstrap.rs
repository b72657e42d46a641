//! 启动装配
//!
//! 读取文档 → 切分 → 建立向量索引 → 恢复对话记录 → 启动 Web 服务

use std::sync::Arc;

use tracing::info;

use crate::application::{ChatSession, FaqAssistant};
use crate::config::AppConfig;
use crate::core::chat::ChatModel;
use crate::core::chunker::TextSplitter;
use crate::core::retrieval::{EmbeddingProvider, VectorIndex};
use crate::core::store::TranscriptStore;
use crate::errors::{FaqError, Result};
use crate::infrastructure::document;
use crate::infrastructure::embeddings::OpenAiEmbedding;
use crate::infrastructure::llm::OpenAIClient;
use crate::infrastructure::logger::Sanitizer;
use crate::infrastructure::store::JsonFileStore;
use crate::infrastructure::web;

/// 服务启动器
pub struct Launcher {
    config: AppConfig,
}

impl Launcher {
    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// 装配全部组件并启动 Web 服务
    pub async fn launch(&self) -> Result<()> {
        self.config.validate()?;
        info!(
            model = %self.config.openai_model,
            embedding_model = %self.config.embedding_model,
            api_key = %Sanitizer::api_key(&self.config.openai_api_key),
            "🚀 Launching pilates FAQ chat"
        );

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedding::new(
            self.config.openai_api_key.clone(),
            self.config.embedding_model.clone(),
            self.config.openai_base_url.clone(),
        ));
        let model: Arc<dyn ChatModel> = Arc::new(OpenAIClient::new_with_base_url(
            self.config.openai_api_key.clone(),
            self.config.openai_model.clone(),
            self.config.openai_base_url.clone(),
        ));
        let store: Arc<dyn TranscriptStore> =
            Arc::new(JsonFileStore::new(&self.config.transcript_path));

        let session = build_session(&self.config, embedder, model, store).await?;

        web::start_web_server(&self.config.bind_addr, session)
            .await
            .map_err(FaqError::from)
    }
}

/// 建立索引并恢复会话
pub async fn build_session(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    model: Arc<dyn ChatModel>,
    store: Arc<dyn TranscriptStore>,
) -> Result<Arc<ChatSession>> {
    let text = document::load_text(&config.document_path).await?;

    let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap)?;
    let chunks = splitter.split(&text);
    info!(chunks = chunks.len(), "document split");

    let index = VectorIndex::build(chunks, embedder)
        .await
        .map_err(|e| FaqError::Embedding(format!("{:#}", e)))?;

    let assistant = Arc::new(FaqAssistant::new(Arc::new(index), model, config.top_k));
    let session = ChatSession::open(store, assistant).await?;

    Ok(Arc::new(session))
}
