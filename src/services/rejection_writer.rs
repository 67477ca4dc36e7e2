//! 拒绝记录写入服务 - 业务能力层
//!
//! 只负责"把被拒绝的提交追加到文件"能力，不关心流程

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::workflow::SubmissionCtx;

/// 拒绝记录写入服务
pub struct RejectionWriter {
    rejections_file_path: String,
}

impl RejectionWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            rejections_file_path: path.into(),
        }
    }

    /// 追加一条拒绝记录
    ///
    /// # 参数
    /// - `ctx`: 提交上下文
    /// - `status`: 状态码
    /// - `reason`: 拒绝原因
    pub async fn write(&self, ctx: &SubmissionCtx, status: u16, reason: &str) -> Result<()> {
        debug!("写入拒绝记录: {} | {} | {}", ctx, status, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.rejections_file_path)
            .with_context(|| format!("无法打开拒绝记录文件: {}", self.rejections_file_path))?;

        let line = format!(
            "{} | 身份 {} | 学期 {} | {} | {}\n",
            ctx.source_name, ctx.claimed_identity, ctx.claimed_term, status, reason
        );

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appends_lines() {
        let path = std::env::temp_dir().join(format!(
            "enrollment_receipt_rejections_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let writer = RejectionWriter::with_path(path.to_string_lossy());
        let ctx = SubmissionCtx::new("a.toml", 1, "123", "2025");

        writer.write(&ctx, 400, "El archivo no es un PDF").await.unwrap();
        writer.write(&ctx, 400, "otra").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("a.toml | 身份 123 | 学期 2025 | 400 | El archivo no es un PDF"));

        let _ = std::fs::remove_file(&path);
    }
}
