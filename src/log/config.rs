//! 声明式 Logger 配置
//!
//! 支持从 JSON/JSON5、YAML、TOML 文件加载，转换为 [`LoggerOption`] 列表后构建 Logger：
//!
//! ```
//! use logx::log::{Logger, LoggerConfig};
//!
//! let config = LoggerConfig::parse(
//!     r#"{ level: "info", json_format: true, replace_keys: { time: "timestamp" } }"#,
//!     "json5",
//! )
//! .unwrap();
//! let logger = Logger::from_config(config).unwrap();
//! logger.info("hello");
//! ```

use crate::log::error::LogError;
use crate::log::level::Level;
use crate::log::options::{
    with_json_format, with_log_level, with_replace_default_key_name, with_set_default,
    with_short_source, with_source, LoggerOption,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LoggerConfig {
    /// 最低输出级别：debug/info/warn/error
    #[default = "debug"]
    pub level: String,

    pub add_source: bool,
    pub add_short_source: bool,
    pub json_format: bool,
    pub set_default: bool,

    /// 保留字段重命名，例如 `{ time: "timestamp" }`
    pub replace_keys: BTreeMap<String, String>,
}

impl LoggerConfig {
    /// 转换为配置项，级别无法识别时返回错误
    pub fn into_options(self) -> Result<Vec<LoggerOption>, LogError> {
        let level: Level = self.level.parse()?;

        let mut options = vec![
            with_log_level(level),
            with_source(self.add_source),
            with_short_source(self.add_short_source),
            with_json_format(self.json_format),
            with_set_default(self.set_default),
        ];
        for (key, name) in self.replace_keys {
            options.push(with_replace_default_key_name(key, name));
        }

        Ok(options)
    }

    /// 按扩展名选择解析器加载配置文件
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &ext)
    }

    /// 按格式名解析配置内容
    pub fn parse(content: &str, format: &str) -> Result<Self> {
        match format {
            "json" | "json5" => Ok(json5::from_str(content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "toml" => Ok(toml::from_str(content)?),
            _ => Err(LogError::UnsupportedFormat(format.to_string()).into()),
        }
    }
}
