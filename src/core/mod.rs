//! 核心层：检索、提示词和存储抽象
//!
//! 不依赖任何外部服务，外部能力通过 trait 注入

pub mod chat;
pub mod chunker;
pub mod prompt;
pub mod retrieval;
pub mod store;
