use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 提交清单（TOML）所在目录
    pub submissions_folder: String,
    /// 处理结果（JSON）输出目录
    pub output_folder: String,
    /// 上传文档的临时目录
    pub temp_dir: String,
    /// 同时处理的提交数量
    pub max_concurrent_submissions: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 拒绝记录文件
    pub rejections_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submissions_folder: "submissions".to_string(),
            output_folder: "output_json".to_string(),
            temp_dir: "temp".to_string(),
            max_concurrent_submissions: 8,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            rejections_file: "rejections.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载，缺失时使用默认值，值无法解析时返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();

        let max_concurrent_submissions = match lookup("MAX_CONCURRENT_SUBMISSIONS") {
            Some(value) => parse_var("MAX_CONCURRENT_SUBMISSIONS", &value, "usize")?,
            None => default.max_concurrent_submissions,
        };
        if max_concurrent_submissions == 0 {
            return Err(ConfigError::InvalidValue {
                var_name: "MAX_CONCURRENT_SUBMISSIONS".to_string(),
                reason: "并发数必须大于 0".to_string(),
            });
        }

        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(value) => parse_var("VERBOSE_LOGGING", &value, "bool")?,
            None => default.verbose_logging,
        };

        Ok(Self {
            submissions_folder: lookup("SUBMISSIONS_FOLDER").unwrap_or(default.submissions_folder),
            output_folder: lookup("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            temp_dir: lookup("TEMP_DIR").unwrap_or(default.temp_dir),
            max_concurrent_submissions,
            verbose_logging,
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            rejections_file: lookup("REJECTIONS_FILE").unwrap_or(default.rejections_file),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: value.to_string(),
        expected_type: expected_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::try_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.submissions_folder, "submissions");
        assert_eq!(config.max_concurrent_submissions, 8);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_from_lookup(lookup_from(&[
            ("TEMP_DIR", "/tmp/boletas"),
            ("MAX_CONCURRENT_SUBMISSIONS", "2"),
            ("VERBOSE_LOGGING", "true"),
        ]))
        .unwrap();
        assert_eq!(config.temp_dir, "/tmp/boletas");
        assert_eq!(config.max_concurrent_submissions, 2);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Config::try_from_lookup(lookup_from(&[("MAX_CONCURRENT_SUBMISSIONS", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { .. }));

        let err = Config::try_from_lookup(lookup_from(&[("MAX_CONCURRENT_SUBMISSIONS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
