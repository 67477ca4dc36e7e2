//! 编排层（Orchestration Layer）
//!
//! 负责批量处理和调度，不做具体业务判断。
//!
//! ```text
//! batch_processor (处理 Vec<SubmissionManifest>)
//!     ↓
//! workflow::SubmissionFlow (处理单份提交)
//!     ↓
//! parsing / services (解析回执、核对声明)
//!     ↓
//! infrastructure (临时文件、PDF 提取)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats};
