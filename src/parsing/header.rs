//! 回执表头解析（第 3、4 行）

use tracing::error;

use super::error::ParseFailure;
use super::tokenizer::LineTokens;

/// 回执正文至少需要的行数：表头在索引 2、3，课程区从索引 4 开始
pub const MIN_LINES: usize = 5;

const LINE3_INDEX: usize = 2;
const LINE4_INDEX: usize = 3;

/// 表头字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub identity: String,
    pub surname1: String,
    pub surname2: String,
    pub given_name: String,
    pub term: String,
    pub receipt_number: String,
}

impl Header {
    /// 姓名按 第一姓氏/第二姓氏/名字 顺序拼接
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.surname1, self.surname2, self.given_name)
    }
}

/// 从行序列中解析表头
///
/// 学期始终取第 3 行的最后一个字段。姓名多于三个字段时，
/// 多出的部分不会被建模，学期仍取末尾字段。
pub fn parse_header(lines: &[LineTokens]) -> Result<Header, ParseFailure> {
    if lines.len() < MIN_LINES {
        error!("文本行数不足: {} 行", lines.len());
        return Err(ParseFailure::InsufficientLines { found: lines.len() });
    }

    let line3 = &lines[LINE3_INDEX];
    if line3.len() < 4 {
        error!("第 3 行字段不足: {:?}", line3);
        return Err(ParseFailure::MalformedHeaderLine3 { found: line3.len() });
    }

    let receipt_number = match lines[LINE4_INDEX].last() {
        Some(token) => token.clone(),
        None => {
            error!("第 4 行没有字段");
            return Err(ParseFailure::MalformedHeaderLine4);
        }
    };

    Ok(Header {
        identity: line3[0].clone(),
        surname1: line3[1].clone(),
        surname2: line3[2].clone(),
        given_name: line3[3].clone(),
        term: line3[line3.len() - 1].clone(),
        receipt_number,
    })
}
