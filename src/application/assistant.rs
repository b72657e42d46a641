//! 问答流程
//!
//! 问题 → 日期事实 + 文档检索 → 提示词 → 模型回答

use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset};
use tracing::{debug, info};

use crate::core::chat::ChatModel;
use crate::core::prompt::{self, PromptContext};
use crate::core::retrieval::VectorIndex;
use crate::domain::calendar::{self, DateFacts};
use crate::errors::{FaqError, Result};
use crate::infrastructure::logger::Timer;

/// FAQ 助手
pub struct FaqAssistant {
    index: Arc<VectorIndex>,
    model: Arc<dyn ChatModel>,
    top_k: usize,
}

impl FaqAssistant {
    pub fn new(index: Arc<VectorIndex>, model: Arc<dyn ChatModel>, top_k: usize) -> Self {
        Self {
            index,
            model,
            top_k,
        }
    }

    /// 以当前韩国时间回答
    pub async fn answer(&self, query: &str) -> Result<String> {
        self.answer_at(query, calendar::kst_now()).await
    }

    /// 以指定时间回答
    pub async fn answer_at(&self, query: &str, now: DateTime<FixedOffset>) -> Result<String> {
        let _timer = Timer::new("faq_answer");

        let today = DateFacts::for_date(now.date_naive());
        let ask = match calendar::extract_date(query, now.year()) {
            Some(date_str) => DateFacts::parse(&date_str)?,
            None => today.clone(),
        };
        debug!(
            ask_date = %ask.date_string(),
            weekday = ask.weekday,
            holiday = ask.is_holiday,
            weekend = ask.is_weekend,
            "date facts computed"
        );

        let hits = self
            .index
            .search(query, self.top_k)
            .await
            .map_err(|e| FaqError::Embedding(format!("{:#}", e)))?;
        debug!(hits = hits.len(), top_score = ?hits.first().map(|h| h.score), "passages retrieved");
        let passages: Vec<String> = hits.into_iter().map(|h| h.chunk.text).collect();

        let current_time = calendar::format_datetime(&now);
        let rendered = prompt::render(&PromptContext {
            passages: &passages,
            current_time: &current_time,
            ask: &ask,
            today: &today,
            question: query,
        });

        let answer = self
            .model
            .complete(&rendered)
            .await
            .map_err(|e| FaqError::Llm(format!("{:#}", e)))?;

        info!(model = self.model.model(), answer_chars = answer.chars().count(), "answer generated");
        Ok(answer)
    }
}
