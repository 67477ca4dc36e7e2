use serde::{Deserialize, Serialize};

/// 单门已注册课程
///
/// 序列化字段名沿用现有调用方使用的线上格式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "curso")]
    pub title: String,
    /// 学分，只保留整数部分（"3.00" → "3"）
    #[serde(rename = "creditos")]
    pub credits: String,
    #[serde(rename = "grupo")]
    pub group: String,
    /// 上课时间，没有对应的时间行时为空字符串
    #[serde(rename = "horario")]
    pub schedule: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

/// 一张注册回执解析出的完整记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(rename = "cedula")]
    pub identity: String,
    /// 第一姓氏 + 第二姓氏 + 名字，单空格连接
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "periodo")]
    pub term: String,
    #[serde(rename = "boleta")]
    pub receipt_number: String,
    #[serde(rename = "cursos")]
    pub courses: Vec<CourseRecord>,
}

impl std::fmt::Display for EnrollmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) 学期 {} 回执 #{} [{} 门课程]",
            self.full_name,
            self.identity,
            self.term,
            self.receipt_number,
            self.courses.len()
        )
    }
}
