//! 提交处理流程 - 流程层
//!
//! 核心职责：定义"一份提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 落盘到临时目录
//! 2. 按文件名判断是否为 PDF
//! 3. 提取首页文本 → 解析回执
//! 4. 核对身份与学期
//! 5. 删除临时文件（任何分支都会执行）

use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::{LopdfExtractor, PageTextExtractor, StagedFile, TempStore};
use crate::models::{EnrollmentRecord, Submission};
use crate::parsing::read_enrollment_document;
use crate::services::{check_claim, is_pdf, ClaimCheck};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 拒绝原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 无法保存上传的文件
    StorageFailed(String),
    /// 文件名不是 PDF
    NotPdf,
    /// 文档无法提取或结构不是注册回执
    NotEnrollmentReceipt,
    /// 回执解析成功，但身份或学期与声明不符
    ClaimMismatch(ClaimCheck),
}

impl Rejection {
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::StorageFailed(_) => 500,
            Rejection::NotPdf | Rejection::NotEnrollmentReceipt | Rejection::ClaimMismatch(_) => {
                400
            }
        }
    }

    /// 返回给调用方的错误信息
    pub fn message(&self) -> String {
        match self {
            Rejection::StorageFailed(reason) => format!("Error al guardar el archivo: {}", reason),
            Rejection::NotPdf => "El archivo no es un PDF".to_string(),
            Rejection::NotEnrollmentReceipt => {
                "El archivo no es una boleta de matricula".to_string()
            }
            Rejection::ClaimMismatch(_) => {
                "El archivo no pertenece al estudiante o el periodo es incorrecto".to_string()
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 提交处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted(EnrollmentRecord),
    Rejected(Rejection),
}

impl SubmissionOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            SubmissionOutcome::Accepted(_) => 200,
            SubmissionOutcome::Rejected(rejection) => rejection.status_code(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }

    /// 响应体：接受时为回执记录，拒绝时为 `{"error": ...}`
    pub fn body(&self) -> JsonValue {
        match self {
            SubmissionOutcome::Accepted(record) => {
                serde_json::to_value(record).unwrap_or_else(|e| json!({ "error": e.to_string() }))
            }
            SubmissionOutcome::Rejected(rejection) => json!({ "error": rejection.message() }),
        }
    }
}

/// 提交处理流程
///
/// - 只持有临时目录和提取器，不持有任何跨提交的可变状态
/// - 多个提交可以并发调用同一个实例
pub struct SubmissionFlow {
    temp_store: TempStore,
    extractor: Arc<dyn PageTextExtractor>,
}

impl SubmissionFlow {
    /// 使用 lopdf 提取器创建流程
    pub fn new(config: &Config) -> Self {
        Self::with_extractor(config, Arc::new(LopdfExtractor::new()))
    }

    /// 使用自定义提取器创建流程
    pub fn with_extractor(config: &Config, extractor: Arc<dyn PageTextExtractor>) -> Self {
        Self {
            temp_store: TempStore::new(&config.temp_dir),
            extractor,
        }
    }

    pub async fn run(&self, submission: &Submission, ctx: &SubmissionCtx) -> SubmissionOutcome {
        info!(
            "{} 📥 收到提交, 文件: {} ({} 字节)",
            ctx,
            submission.file_name,
            submission.document.len()
        );

        let staged = match self
            .temp_store
            .stage(
                &submission.claimed_identity,
                &submission.file_name,
                &submission.document,
            )
            .await
        {
            Ok(staged) => staged,
            Err(e) => {
                error!("{} 保存文件失败: {}", ctx, e);
                return SubmissionOutcome::Rejected(Rejection::StorageFailed(e.to_string()));
            }
        };

        let outcome = self.evaluate(&staged, submission, ctx).await;
        self.temp_store.discard(staged).await;

        match &outcome {
            SubmissionOutcome::Accepted(_) => info!("{} ✅ 处理成功", ctx),
            SubmissionOutcome::Rejected(rejection) => {
                warn!("{} ❌ 已拒绝 ({}): {}", ctx, rejection.status_code(), rejection)
            }
        }

        outcome
    }

    async fn evaluate(
        &self,
        staged: &StagedFile,
        submission: &Submission,
        ctx: &SubmissionCtx,
    ) -> SubmissionOutcome {
        if !is_pdf(staged.path()) {
            error!("{} 文件不是 PDF: {}", ctx, submission.file_name);
            return SubmissionOutcome::Rejected(Rejection::NotPdf);
        }

        let document = match self.temp_store.read(staged).await {
            Ok(document) => document,
            Err(e) => {
                error!("{} 读取临时文件失败: {}", ctx, e);
                return SubmissionOutcome::Rejected(Rejection::StorageFailed(e.to_string()));
            }
        };

        // 提取与解析是纯 CPU 计算，放到阻塞线程池
        let extractor = Arc::clone(&self.extractor);
        let parsed = tokio::task::spawn_blocking(move || {
            read_enrollment_document(extractor.as_ref(), &document)
        })
        .await;

        let record = match parsed {
            Ok(Ok(record)) => record,
            // 提取失败与结构不符都视为不是回执
            Ok(Err(e)) => {
                error!("{} 不是有效的注册回执: {}", ctx, e);
                return SubmissionOutcome::Rejected(Rejection::NotEnrollmentReceipt);
            }
            Err(e) => {
                error!("{} 解析任务执行失败: {}", ctx, e);
                return SubmissionOutcome::Rejected(Rejection::NotEnrollmentReceipt);
            }
        };

        let check = check_claim(&record, &submission.claimed_identity, &submission.claimed_term);
        if !check.accepted() {
            error!(
                "{} 身份或学期不符 - 文档身份: {}, 文档学期: {}",
                ctx, record.identity, record.term
            );
            return SubmissionOutcome::Rejected(Rejection::ClaimMismatch(check));
        }

        SubmissionOutcome::Accepted(record)
    }
}
