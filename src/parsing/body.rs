//! 课程区解析
//!
//! 课程区由两种行交替组成：
//! - 课程行：`代码 组别+标题... 学分 x x`，首字段长度大于 1
//! - 时间行：`日 开始 结束 x 地点 编号.x`，首字段长度不超过 1
//!
//! 两种行分别收集，之后由 assembler 按位置合并。

use tracing::debug;

use super::error::ParseFailure;
use super::tokenizer::LineTokens;

/// 课程区结束标记行的首字段
pub const SENTINEL: &str = "Total";

/// 课程行和时间行的最少字段数，字段更少的行直接跳过
pub const MIN_BODY_TOKENS: usize = 6;

/// 课程行解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDescriptor {
    pub code: String,
    pub title: String,
    pub credits: String,
    pub group: String,
}

/// 时间行解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDescriptor {
    pub schedule: String,
    pub location: String,
}

/// 课程区中一行的分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Course(CourseDescriptor),
    Schedule(ScheduleDescriptor),
}

/// 课程区累积结果，两个序列各自保持出现顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyEntries {
    pub courses: Vec<CourseDescriptor>,
    pub schedules: Vec<ScheduleDescriptor>,
}

/// 解析课程区
///
/// # 参数
/// - `lines`: 课程区的行（表头之后的所有行）
/// - `identity`: 表头中的身份号，末字段等于它的行视为页脚签名行并跳过
/// - `first_line_number`: `lines[0]` 在原文中的行号（从 1 开始），仅用于报错
///
/// # 返回
/// 遇到 `Total` 行或行序列结束时返回累积结果
pub fn parse_body(
    lines: &[LineTokens],
    identity: &str,
    first_line_number: usize,
) -> Result<BodyEntries, ParseFailure> {
    let mut entries = BodyEntries::default();

    for (offset, tokens) in lines.iter().enumerate() {
        let line_number = first_line_number + offset;

        let Some(first) = tokens.first() else {
            continue;
        };
        if first == SENTINEL {
            debug!("第 {} 行为结束标记", line_number);
            break;
        }
        if tokens.len() < MIN_BODY_TOKENS || tokens.last().map(String::as_str) == Some(identity) {
            debug!("跳过第 {} 行: {:?}", line_number, tokens);
            continue;
        }

        match classify(tokens, line_number)? {
            BodyLine::Course(course) => entries.courses.push(course),
            BodyLine::Schedule(schedule) => entries.schedules.push(schedule),
        }
    }

    Ok(entries)
}

/// 按首字段长度把一行归类为课程行或时间行
///
/// 调用方需已过滤掉字段不足的行；字段访问越界时返回 `MalformedBodyLine`
pub fn classify(tokens: &[String], line_number: usize) -> Result<BodyLine, ParseFailure> {
    let first = token_at(tokens, 0, line_number)?;

    if first.chars().count() > 1 {
        parse_course(tokens, line_number).map(BodyLine::Course)
    } else {
        parse_schedule(tokens, line_number).map(BodyLine::Schedule)
    }
}

fn parse_course(tokens: &[String], line_number: usize) -> Result<CourseDescriptor, ParseFailure> {
    let malformed = || ParseFailure::MalformedBodyLine { line: line_number };

    let code = token_at(tokens, 0, line_number)?;
    let fused = token_at(tokens, 1, line_number)?;
    let group = fused.chars().next().ok_or_else(malformed)?;

    // 标题为 tokens[1..len-3]，其中 tokens[1] 去掉开头的组别字母
    let title_end = tokens.len().checked_sub(3).filter(|end| *end > 1).ok_or_else(malformed)?;
    let mut title_parts = Vec::with_capacity(title_end - 1);
    // 只去掉开头这一个组别字母，标题里后面出现的同一字母保留
    title_parts.push(&fused[group.len_utf8()..]);
    title_parts.extend(tokens[2..title_end].iter().map(String::as_str));
    let title = title_parts.join(" ").trim().to_string();

    let credits = integer_part(token_at(tokens, title_end, line_number)?);

    Ok(CourseDescriptor {
        code: code.to_string(),
        title,
        credits: credits.to_string(),
        group: group.to_string(),
    })
}

fn parse_schedule(
    tokens: &[String],
    line_number: usize,
) -> Result<ScheduleDescriptor, ParseFailure> {
    let day = token_at(tokens, 0, line_number)?;
    let start = token_at(tokens, 1, line_number)?;
    let end = token_at(tokens, 2, line_number)?;
    let building = token_at(tokens, 4, line_number)?;
    let room = token_at(tokens, 5, line_number)?;

    Ok(ScheduleDescriptor {
        schedule: format!("{} {} a {}", day, start, end),
        location: format!("{} {}", building, integer_part(room)),
    })
}

/// 取第一个 `.` 之前的部分，不做四舍五入
fn integer_part(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}

fn token_at<'a>(tokens: &'a [String], index: usize, line_number: usize) -> Result<&'a str, ParseFailure> {
    tokens
        .get(index)
        .map(String::as_str)
        .ok_or(ParseFailure::MalformedBodyLine { line: line_number })
}
