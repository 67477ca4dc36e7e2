//! 批量提交处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、输出目录、提交流程
//! 2. **批量加载**：扫描并加载所有提交清单（`Vec<SubmissionManifest>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量，分批处理
//! 4. **结果落盘**：每份提交写一个 JSON 文件，拒绝的另外追加到拒绝记录
//! 5. **全局统计**：汇总通过、拒绝、失败数量

use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{load_all_submissions, load_submission, SubmissionManifest};
use crate::services::RejectionWriter;
use crate::utils::logging::{init_log_file, log_batch, write_run_summary};
use crate::workflow::{SubmissionCtx, SubmissionFlow, SubmissionOutcome};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<SubmissionFlow>,
    rejection_writer: Arc<RejectionWriter>,
}

/// 单份提交的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionStatus {
    Accepted,
    Rejected,
}

impl App {
    /// 初始化应用（使用 lopdf 提取器）
    pub async fn initialize(config: Config) -> Result<Self> {
        let flow = SubmissionFlow::new(&config);
        Self::with_flow(config, flow).await
    }

    /// 使用指定的提交流程初始化应用
    pub async fn with_flow(config: Config, flow: SubmissionFlow) -> Result<Self> {
        init_log_file(&config.output_log_file, config.max_concurrent_submissions)
            .with_context(|| format!("无法初始化日志文件: {}", config.output_log_file))?;

        tokio::fs::create_dir_all(&config.output_folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", config.output_folder))?;

        let rejection_writer = RejectionWriter::with_path(config.rejections_file.clone());

        Ok(Self {
            config,
            flow: Arc::new(flow),
            rejection_writer: Arc::new(rejection_writer),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("📁 正在扫描待处理的提交...");
        let manifests = load_all_submissions(&self.config.submissions_folder).await?;

        if manifests.is_empty() {
            warn!("⚠️ 没有找到待处理的提交清单，程序结束");
            return Ok(ProcessingStats::default());
        }

        info!("✓ 找到 {} 份待处理的提交", manifests.len());

        let stats = self.process_all(manifests).await?;

        write_run_summary(
            &self.config.output_log_file,
            stats.accepted,
            stats.rejected,
            stats.failed,
            stats.total,
        )?;

        Ok(stats)
    }

    /// 分批处理所有提交
    async fn process_all(&self, manifests: Vec<SubmissionManifest>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_submissions.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = manifests.len();
        let total_batches = total.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (batch_index, batch) in manifests.chunks(batch_size).enumerate() {
            let batch_start = batch_index * batch_size;
            let result = self
                .process_batch(batch, batch_start, semaphore.clone())
                .await?;

            stats.accepted += result.accepted;
            stats.rejected += result.rejected;
            stats.failed += result.failed;

            log_batch(batch_index + 1, total_batches, result.accepted, batch.len());
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: &[SubmissionManifest],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<ProcessingStats> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, manifest) in batch.iter().enumerate() {
            let index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let manifest = manifest.clone();
            let flow = Arc::clone(&self.flow);
            let rejection_writer = Arc::clone(&self.rejection_writer);
            let output_folder = PathBuf::from(&self.config.output_folder);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_one(&flow, &rejection_writer, &output_folder, manifest, index).await
            });
            handles.push((index, handle));
        }

        let mut result = ProcessingStats {
            total: batch.len(),
            ..Default::default()
        };

        for (index, handle) in handles {
            match handle.await {
                Ok(Ok(SubmissionStatus::Accepted)) => result.accepted += 1,
                Ok(Ok(SubmissionStatus::Rejected)) => result.rejected += 1,
                Ok(Err(e)) => {
                    error!("[提交 {}] ❌ 处理过程中发生错误: {:#}", index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[提交 {}] 任务执行失败: {}", index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
    pub total: usize,
}

/// 处理一份提交并写出结果
async fn process_one(
    flow: &SubmissionFlow,
    rejection_writer: &RejectionWriter,
    output_folder: &std::path::Path,
    manifest: SubmissionManifest,
    index: usize,
) -> Result<SubmissionStatus> {
    let submission = load_submission(&manifest).await?;
    let ctx = SubmissionCtx::new(
        manifest.stem(),
        index,
        submission.claimed_identity.clone(),
        submission.claimed_term.clone(),
    );

    let outcome = flow.run(&submission, &ctx).await;

    let output_path = output_folder.join(format!("{}.json", manifest.stem()));
    let payload = json!({
        "status": outcome.status_code(),
        "body": outcome.body(),
    });
    tokio::fs::write(&output_path, serde_json::to_string_pretty(&payload)?)
        .await
        .with_context(|| format!("无法写入结果文件: {}", output_path.display()))?;

    match outcome {
        SubmissionOutcome::Accepted(_) => Ok(SubmissionStatus::Accepted),
        SubmissionOutcome::Rejected(rejection) => {
            rejection_writer
                .write(&ctx, rejection.status_code(), &rejection.message())
                .await?;
            Ok(SubmissionStatus::Rejected)
        }
    }
}
