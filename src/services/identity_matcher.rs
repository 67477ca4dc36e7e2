//! 身份与学期核对服务 - 业务能力层
//!
//! 只负责比较解析结果与调用方声明的值，不关心文件来源

use tracing::info;

use crate::models::EnrollmentRecord;

/// 核对结果，两个字段分别给出身份与学期是否一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimCheck {
    pub identity_matches: bool,
    pub term_matches: bool,
}

impl ClaimCheck {
    pub fn accepted(&self) -> bool {
        self.identity_matches && self.term_matches
    }
}

/// 学期宽松匹配
///
/// 完全相同，或记录中的学期以 `-` + 声明值结尾（"2025" 可匹配 "I-2025"）
pub fn term_matches(record_term: &str, claimed_term: &str) -> bool {
    record_term == claimed_term || record_term.ends_with(&format!("-{}", claimed_term))
}

/// 分别核对身份和学期
pub fn check_claim(record: &EnrollmentRecord, claimed_identity: &str, claimed_term: &str) -> ClaimCheck {
    info!(
        "核对身份 - 文档: {}, 声明: {}",
        record.identity, claimed_identity
    );
    info!("核对学期 - 文档: {}, 声明: {}", record.term, claimed_term);

    ClaimCheck {
        identity_matches: record.identity == claimed_identity,
        term_matches: term_matches(&record.term, claimed_term),
    }
}

/// 身份完全一致且学期宽松匹配时接受
pub fn matches_claim(record: &EnrollmentRecord, claimed_identity: &str, claimed_term: &str) -> bool {
    check_claim(record, claimed_identity, claimed_term).accepted()
}
