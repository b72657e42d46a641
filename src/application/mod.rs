//! 应用层：问答流程与会话编排

pub mod assistant;
pub mod session;

pub use assistant::FaqAssistant;
pub use session::ChatSession;
