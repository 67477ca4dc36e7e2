use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 一次提交：上传的文档和调用方声明的身份、学期
#[derive(Debug, Clone)]
pub struct Submission {
    pub file_name: String,
    pub document: Vec<u8>,
    pub claimed_identity: String,
    pub claimed_term: String,
}

impl Submission {
    pub fn new(
        file_name: impl Into<String>,
        document: Vec<u8>,
        claimed_identity: impl Into<String>,
        claimed_term: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            document,
            claimed_identity: claimed_identity.into(),
            claimed_term: claimed_term.into(),
        }
    }
}

/// 提交清单（TOML）
///
/// ```toml
/// file = "boleta.pdf"
/// identity = "123450678"
/// term = 2025
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionManifest {
    /// 文档路径，相对于清单所在目录
    pub file: String,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub identity: String,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub term: String,
    #[serde(skip_serializing, skip_deserializing)]
    pub manifest_path: Option<PathBuf>,
}

impl SubmissionManifest {
    /// 清单文件名（不含扩展名），用作输出文件名
    pub fn stem(&self) -> String {
        self.manifest_path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.clone())
    }

    /// 文档的实际路径
    pub fn document_path(&self) -> PathBuf {
        match self.manifest_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(&self.file),
            None => PathBuf::from(&self.file),
        }
    }

    /// 上传时的文件名
    pub fn file_name(&self) -> String {
        Path::new(&self.file)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.clone())
    }

    pub fn with_manifest_path(mut self, path: PathBuf) -> Self {
        self.manifest_path = Some(path);
        self
    }
}

// 身份号和学期在 TOML 里可能写成整数（如 term = 2025）
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct LooseStringVisitor;

    impl<'de> Visitor<'de> for LooseStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(LooseStringVisitor)
}
