//! 标准化错误处理
//!
//! 定义项目专用的错误类型

use thiserror::Error;

/// 项目主要错误类型
#[derive(Error, Debug)]
pub enum FaqError {
    /// 日期无法解析或不存在（例如 2025-13-40）
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// 源文档读取/解析错误
    #[error("Document error: {0}")]
    Document(String),

    /// 对话记录存储错误
    #[error("Storage error: {0}")]
    Storage(String),

    /// 向量化服务错误
    #[error("Embedding service error: {0}")]
    Embedding(String),

    /// LLM 服务错误
    #[error("LLM service error: {0}")]
    Llm(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 输入验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 未知错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FaqError {
    /// 是否为调用方输入导致的错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, FaqError::InvalidDate(_) | FaqError::Validation(_))
    }
}

impl From<anyhow::Error> for FaqError {
    fn from(err: anyhow::Error) -> Self {
        FaqError::Unknown(format!("{:#}", err))
    }
}

impl From<std::io::Error> for FaqError {
    fn from(err: std::io::Error) -> Self {
        FaqError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FaqError {
    fn from(err: serde_json::Error) -> Self {
        FaqError::Storage(err.to_string())
    }
}

/// 项目结果类型别名
pub type Result<T> = std::result::Result<T, FaqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(FaqError::InvalidDate("2025-13-40".into()).is_client_error());
        assert!(FaqError::Validation("empty".into()).is_client_error());
        assert!(!FaqError::Llm("timeout".into()).is_client_error());
        assert!(!FaqError::Storage("disk full".into()).is_client_error());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FaqError = io.into();
        assert!(matches!(err, FaqError::Storage(_)));
        assert!(err.to_string().starts_with("Storage error"));
    }
}
