//! # Enrollment Receipt
//!
//! 读取学生上传的注册回执（单页 PDF），解析出身份、学期、回执号与已注册课程，
//! 并与调用方声明的身份、学期核对。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 临时文件落盘、PDF 首页文本提取
//! - `PageTextExtractor` - 提取能力抽象，默认实现 `LopdfExtractor`
//!
//! ### ② 解析层（Parsing）
//! - `parsing/` - 纯函数：分词 → 表头 → 课程区 → 按位置合并
//!
//! ### ③ 业务能力层（Services）
//! - `identity_matcher` - 身份/学期核对
//! - `document_sniffer` - 按文件名判断 PDF
//! - `RejectionWriter` - 写拒绝记录
//!
//! ### ④ 流程层（Workflow）
//! - `SubmissionFlow` - 单份提交：落盘 → 判断类型 → 解析 → 核对 → 清理
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量加载提交清单，并发处理，输出结果

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod parsing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{LopdfExtractor, PageTextExtractor};
pub use models::{CourseRecord, EnrollmentRecord, Submission};
pub use orchestrator::{App, ProcessingStats};
pub use parsing::{parse_enrollment_document, read_enrollment_document, ParseFailure};
pub use services::{check_claim, matches_claim, ClaimCheck};
pub use workflow::{Rejection, SubmissionCtx, SubmissionFlow, SubmissionOutcome};
