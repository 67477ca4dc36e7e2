//! 基础设施层
//!
//! 持有文件系统和文档格式相关的能力，不认识回执的业务含义

pub mod pdf_extractor;
pub mod temp_store;

pub use pdf_extractor::{LopdfExtractor, PageTextExtractor};
pub use temp_store::{StagedFile, TempStore};
