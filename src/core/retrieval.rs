//! 向量检索
//!
//! 启动时对全部文档片段向量化一次，查询时按余弦相似度取 top-k。

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::chunker::Chunk;

/// 向量化服务接口
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// 提供方名称
    fn name(&self) -> &str;

    /// 批量向量化，返回顺序与输入一致
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// 检索结果
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// 内存向量索引
pub struct VectorIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl VectorIndex {
    /// 向量化所有片段并建立索引
    pub async fn build(chunks: Vec<Chunk>, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        if chunks.is_empty() {
            return Ok(Self {
                entries: Vec::new(),
                provider,
            });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = provider.embed(&texts).await?;
        if vectors.len() != chunks.len() {
            anyhow::bail!(
                "{} returned {} embeddings for {} chunks",
                provider.name(),
                vectors.len(),
                chunks.len()
            );
        }

        debug!(chunks = chunks.len(), provider = provider.name(), "vector index built");

        Ok(Self {
            entries: chunks.into_iter().zip(vectors).collect(),
            provider,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 查询最相似的 `k` 个片段，分数从高到低
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self
            .provider
            .embed(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("{} returned no embedding", self.provider.name()))?;

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, vec)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&query_vec, vec),
            })
            .collect();

        // 稳定排序，同分保持文档顺序
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        Ok(scored)
    }
}

/// 余弦相似度，任一向量为零时返回 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        return 0.0;
    }
    (dot / (mag_a * mag_b)).clamp(-1.0, 1.0)
}
