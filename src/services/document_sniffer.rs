use std::path::Path;

/// 按文件名判断是否为 PDF
///
/// 取文件名最后一个 `.` 之后的部分，忽略大小写与 `pdf` 比较，不检查内容
pub fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit('.').next())
        .map(|extension| extension.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
