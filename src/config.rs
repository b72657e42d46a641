//! 应用配置
//!
//! 全部来自环境变量（启动时先加载 `.env`）

use std::path::PathBuf;

use crate::errors::{FaqError, Result};
use crate::infrastructure::logger::LogFormat;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

#[derive(Debug, Clone)]
pub struct AppConfig {
    // LLM 配置
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub embedding_model: String,

    // 文档与检索
    /// 工作室规章文档（.pdf 或纯文本）
    pub document_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,

    /// 对话记录文件
    pub transcript_path: PathBuf,

    /// Web 监听地址
    pub bind_addr: String,

    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            document_path: PathBuf::from("data/Pilates.pdf"),
            chunk_size: 150,
            chunk_overlap: 100,
            top_k: 3,
            transcript_path: PathBuf::from("conversation.json"),
            bind_addr: "127.0.0.1:8501".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取，未设置的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            embedding_model: get("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            document_path: get("DOCUMENT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.document_path),
            chunk_size: parse_number("CHUNK_SIZE", get("CHUNK_SIZE"), defaults.chunk_size)?,
            chunk_overlap: parse_number(
                "CHUNK_OVERLAP",
                get("CHUNK_OVERLAP"),
                defaults.chunk_overlap,
            )?,
            top_k: parse_number("RETRIEVAL_TOP_K", get("RETRIEVAL_TOP_K"), defaults.top_k)?,
            transcript_path: get("TRANSCRIPT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.transcript_path),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            log_format: match get("LOG_FORMAT") {
                Some(v) => v.parse().map_err(FaqError::Config)?,
                None => defaults.log_format,
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            return Err(FaqError::Config("OPENAI_API_KEY is required".into()));
        }
        if self.chunk_size == 0 {
            return Err(FaqError::Config("CHUNK_SIZE must be positive".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(FaqError::Config(
                "CHUNK_OVERLAP must be smaller than CHUNK_SIZE".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(FaqError::Config("RETRIEVAL_TOP_K must be positive".into()));
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: Option<String>, default: usize) -> Result<usize> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| FaqError::Config(format!("{} must be a number, got '{}'", key, v))),
        None => Ok(default),
    }
}
