//! 源文档读取
//!
//! `.pdf` 通过 pdf-extract 提取文本，其它文件按 UTF-8 文本读取

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{FaqError, Result};

/// 读取文档全文
pub async fn load_text(path: &Path) -> Result<String> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(FaqError::Document(format!(
            "document not found: {}",
            path.display()
        )));
    }

    let text = if is_pdf(path) {
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| FaqError::Document(format!("pdf worker failed: {}", e)))?
            .map_err(|e| FaqError::Document(format!("{}: {}", path.display(), e)))?
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FaqError::Document(format!("{}: {}", path.display(), e)))?
    };

    info!(
        path = %path.display(),
        chars = text.chars().count(),
        "document loaded"
    );

    Ok(text)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
