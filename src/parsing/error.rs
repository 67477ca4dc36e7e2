use thiserror::Error;

/// 回执文本结构不符合预期时的失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// 行数不足 5 行
    #[error("文本行数不足: 需要至少 5 行, 实际 {found} 行")]
    InsufficientLines { found: usize },

    /// 第 3 行字段少于 4 个
    #[error("第 3 行字段不足: 需要至少 4 个, 实际 {found} 个")]
    MalformedHeaderLine3 { found: usize },

    /// 第 4 行没有任何字段
    #[error("第 4 行没有字段")]
    MalformedHeaderLine4,

    /// 课程区某一行既不是课程行也不是时间行（行号从 1 开始）
    #[error("第 {line} 行无法识别为课程行或时间行")]
    MalformedBodyLine { line: usize },
}
