//! 필라테스 FAQ 问答服务
//!
//! 根据工作室规章文档回答用户问题：
//! - 文档切分与向量检索
//! - 日期事实计算（星期、公休日、周末）
//! - 调用 OpenAI 生成回答
//! - 对话记录持久化为单个 JSON 文件
//!
//! # 架构分层
//!
//! - `domain`: 领域实体（消息、日历事实）
//! - `core`: 核心能力（切分、检索、提示词、存储抽象）
//! - `infrastructure`: 基础设施层，外部系统交互
//! - `application`: 应用层，问答流程与会话

// 领域层
pub mod domain;

// 核心层
pub mod core;

// 基础设施层
pub mod infrastructure;

// 应用层
pub mod application;

pub mod bootstrap;
pub mod config;
pub mod errors;

pub use application::{ChatSession, FaqAssistant};
pub use bootstrap::Launcher;
pub use config::AppConfig;
pub use domain::{DateFacts, Message, Role};
pub use errors::{FaqError, Result};
