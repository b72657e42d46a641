//! 基础设施层：外部系统交互
//!
//! 提供与外部系统（LLM、向量化服务、文件系统、HTTP、日志）的交互能力

pub mod document;
pub mod embeddings;
pub mod llm;
pub mod logger;
pub mod store;
pub mod web;
