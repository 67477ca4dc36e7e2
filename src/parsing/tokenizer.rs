//! 版面分词
//!
//! 把一页文本切成行，每行再按空白切成字段，不做任何语义判断

/// 一行文本切出的非空字段
pub type LineTokens = Vec<String>;

/// 将整页文本切分为行序列
///
/// 按 `\n` 分行（保留空行，行号与原文一致），每行按连续空白切分并丢弃空字段。
/// 空输入返回空序列。
pub fn tokenize(page_text: &str) -> Vec<LineTokens> {
    if page_text.is_empty() {
        return Vec::new();
    }

    page_text
        .split('\n')
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}
