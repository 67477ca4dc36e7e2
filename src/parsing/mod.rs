//! 注册回执解析
//!
//! 流程：分词 → 表头 → 课程区 → 按位置合并 → `EnrollmentRecord`
//!
//! 解析是纯函数，不持有任何跨调用的状态。

use tracing::{debug, error, info};

use crate::error::AppResult;
use crate::infrastructure::PageTextExtractor;
use crate::models::EnrollmentRecord;

pub mod assembler;
pub mod body;
pub mod error;
pub mod header;
pub mod tokenizer;

pub use assembler::assemble_courses;
pub use body::{parse_body, BodyEntries, BodyLine, CourseDescriptor, ScheduleDescriptor};
pub use error::ParseFailure;
pub use header::{parse_header, Header};
pub use tokenizer::{tokenize, LineTokens};

/// 课程区在行序列中的起始索引
const BODY_START_INDEX: usize = 4;

/// 解析一页回执文本
///
/// # 参数
/// - `page_text`: 提取器输出的整页文本
///
/// # 返回
/// 结构完整时返回记录，否则返回具体的失败原因
pub fn parse_enrollment_document(page_text: &str) -> Result<EnrollmentRecord, ParseFailure> {
    let lines = tokenize(page_text);
    debug!("文本共 {} 行", lines.len());
    for (index, tokens) in lines.iter().enumerate() {
        debug!("第 {} 行: {}", index, tokens.join(" "));
    }

    let header = parse_header(&lines)?;
    let entries = parse_body(
        &lines[BODY_START_INDEX..],
        &header.identity,
        BODY_START_INDEX + 1,
    )
    .inspect_err(|e| error!("课程区解析失败: {}", e))?;
    debug!(
        "课程行 {} 条, 时间行 {} 条",
        entries.courses.len(),
        entries.schedules.len()
    );

    let record = EnrollmentRecord {
        full_name: header.full_name(),
        identity: header.identity,
        term: header.term,
        receipt_number: header.receipt_number,
        courses: assemble_courses(entries),
    };

    info!("✓ 回执解析成功: {}", record);
    Ok(record)
}

/// 从文档字节中提取首页文本并解析
///
/// 提取失败返回 `AppError::Extraction`，结构不符返回 `AppError::Parse`
pub fn read_enrollment_document(
    extractor: &dyn PageTextExtractor,
    document: &[u8],
) -> AppResult<EnrollmentRecord> {
    let page_text = extractor.extract_first_page(document)?;
    Ok(parse_enrollment_document(&page_text)?)
}
