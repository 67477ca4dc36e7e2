//! 文档文本提取器 - 基础设施层
//!
//! 只暴露"给我第一页的文本"这一能力，不认识回执格式

use lopdf::Document;
use tracing::debug;

use crate::error::ExtractionError;

/// 页面文本提取能力
///
/// 实现方负责自己的行重建和空白合并规则，解析层按原样接收
pub trait PageTextExtractor: Send + Sync {
    /// 提取文档第一页的文本，行与行之间以 `\n` 分隔
    fn extract_first_page(&self, document: &[u8]) -> Result<String, ExtractionError>;
}

/// 基于 lopdf 的 PDF 提取器
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextExtractor for LopdfExtractor {
    fn extract_first_page(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let pdf = Document::load_mem(document).map_err(|e| ExtractionError::LoadFailed {
            source: Box::new(e),
        })?;

        // get_pages 返回按页码排序的 BTreeMap
        let first_page = *pdf
            .get_pages()
            .keys()
            .next()
            .ok_or(ExtractionError::NoPages)?;
        debug!("文档共 {} 页, 读取第 {} 页", pdf.get_pages().len(), first_page);

        pdf.extract_text(&[first_page])
            .map_err(|e| ExtractionError::TextFailed {
                page: first_page,
                source: Box::new(e),
            })
    }
}
