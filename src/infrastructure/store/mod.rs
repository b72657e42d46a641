//! 存储实现

pub mod json_file;

pub use json_file::JsonFileStore;
