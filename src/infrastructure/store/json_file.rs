//! JSON 文件存储实现
//!
//! 整个对话记录保存为一个 JSON 数组（两格缩进，非 ASCII 原样保留）。
//! 写入先落到同目录临时文件再 rename，文件内容始终是一次完整的保存。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::core::store::TranscriptStore;
use crate::domain::Message;

/// JSON 文件存储
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "conversation.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TranscriptStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Message>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("读取对话记录失败: {}", self.path.display()))?;
        let messages: Vec<Message> = serde_json::from_str(&raw)
            .with_context(|| format!("解析对话记录失败: {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = messages.len(), "transcript loaded");
        Ok(messages)
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(messages).context("序列化对话记录失败")?;
        let tmp = self.temp_path();

        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .with_context(|| format!("写入临时文件失败: {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("替换对话记录失败: {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = messages.len(), "transcript saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "transcript removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("删除对话记录失败: {}", self.path.display())),
        }
    }
}
