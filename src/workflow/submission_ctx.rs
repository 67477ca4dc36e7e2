//! 提交处理上下文
//!
//! 封装"我正在处理哪一份提交"这一信息

use std::fmt::Display;

/// 提交处理上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 来源名称（清单文件名），仅用于日志和拒绝记录
    pub source_name: String,

    /// 提交索引（从1开始，仅用于日志显示）
    pub index: usize,

    /// 声明的身份号
    pub claimed_identity: String,

    /// 声明的学期
    pub claimed_term: String,
}

impl SubmissionCtx {
    pub fn new(
        source_name: impl Into<String>,
        index: usize,
        claimed_identity: impl Into<String>,
        claimed_term: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            index,
            claimed_identity: claimed_identity.into(),
            claimed_term: claimed_term.into(),
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[提交#{} {} 身份#{} 学期#{}]",
            self.index, self.source_name, self.claimed_identity, self.claimed_term
        )
    }
}
