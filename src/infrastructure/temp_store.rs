//! 临时文件存储 - 基础设施层
//!
//! 上传的文档先落盘到临时目录，处理结束后删除
//!
//! 每次落盘使用独立的子目录 `<temp_dir>/<pid>-<序号>/`，
//! 同一身份、同名文件的并发提交不会互相覆盖或删除

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// 进程内落盘序号
static STAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// 临时目录
#[derive(Debug, Clone)]
pub struct TempStore {
    dir: PathBuf,
}

/// 已落盘的临时文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    slot: PathBuf,
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TempStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 写入临时文件
    ///
    /// # 参数
    /// - `identity`: 声明的身份号，作为文件名前缀
    /// - `file_name`: 上传时的文件名（保留扩展名）
    /// - `content`: 文件内容
    ///
    /// # 返回
    /// 返回临时文件句柄，文件位于本次落盘独占的子目录
    pub async fn stage(
        &self,
        identity: &str,
        file_name: &str,
        content: &[u8],
    ) -> AppResult<StagedFile> {
        let seq = STAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        let slot = self.dir.join(format!("{}-{}", std::process::id(), seq));

        fs::create_dir_all(&slot)
            .await
            .map_err(|e| AppError::file_write_failed(slot.display().to_string(), e))?;

        let path = slot.join(format!("{}{}", identity, file_name));
        debug!("临时文件路径: {}", path.display());

        if let Err(e) = fs::write(&path, content).await {
            let _ = fs::remove_dir(&slot).await;
            return Err(AppError::file_write_failed(path.display().to_string(), e));
        }
        info!("✓ 文件已保存到: {}", path.display());

        Ok(StagedFile { slot, path })
    }

    /// 读取临时文件内容
    pub async fn read(&self, staged: &StagedFile) -> AppResult<Vec<u8>> {
        fs::read(&staged.path)
            .await
            .map_err(|e| AppError::file_read_failed(staged.path.display().to_string(), e))
    }

    /// 删除临时文件及其子目录
    ///
    /// 删除失败只记录警告，不影响处理结果
    pub async fn discard(&self, staged: StagedFile) {
        match fs::remove_file(&staged.path).await {
            Ok(()) => debug!("已删除临时文件: {}", staged.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("删除临时文件失败 {}: {}", staged.path.display(), e),
        }
        match fs::remove_dir(&staged.slot).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("删除临时目录失败 {}: {}", staged.slot.display(), e),
        }
    }
}
