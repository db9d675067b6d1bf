use crate::log::attr::Attr;
use crate::log::level::Level;
use serde::Serialize;
use std::fmt;
use std::panic::Location;
use std::time::SystemTime;

/// 调用点信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// 函数或模块路径（无法获取时为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// 源文件路径
    pub file: String,
    /// 行号
    pub line: u32,
}

impl Source {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            function: None,
            file: file.into(),
            line,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }
}

impl From<&Location<'_>> for Source {
    fn from(location: &Location<'_>) -> Self {
        Source::new(location.file(), location.line())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// 日志记录
///
/// 每次输出日志时创建，交给 Handler 处理后即被丢弃
#[derive(Debug, Clone)]
pub struct Record {
    /// 时间戳
    pub time: SystemTime,
    /// 日志级别
    pub level: Level,
    /// 日志消息
    pub message: String,
    /// 调用点（未开启采集时为空）
    pub source: Option<Source>,
    /// 用户附加的结构化字段
    pub attrs: Vec<Attr>,
}

impl Record {
    /// 创建新的日志记录
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: SystemTime::now(),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    /// 设置调用点
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// 追加一个字段
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// 追加多个字段
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::attr;

    #[test]
    fn test_record_new() {
        let record = Record::new(Level::INFO, "test message");

        assert_eq!(record.level, Level::INFO);
        assert_eq!(record.message, "test message");
        assert!(record.source.is_none());
        assert!(record.attrs.is_empty());
    }

    #[test]
    fn test_record_builder_pattern() {
        let record = Record::new(Level::WARN, "warning")
            .with_source(Source::new("main.rs", 10))
            .with_attr(attr::int64("user_id", 12345))
            .with_attrs(vec![attr::string("username", "alice"), attr::bool("success", true)]);

        assert_eq!(record.source, Some(Source::new("main.rs", 10)));
        assert_eq!(record.attrs.len(), 3);
        assert_eq!(record.attrs[0].key, "user_id");
        assert_eq!(record.attrs[2].key, "success");
    }

    #[test]
    fn test_source_from_location() {
        let location = Location::caller();
        let source = Source::from(location);

        assert_eq!(source.file, location.file());
        assert_eq!(source.line, location.line());
        assert!(source.function.is_none());
    }

    #[test]
    fn test_source_display_and_serialize() {
        let source = Source::new("src/log/record.rs", 42);
        assert_eq!(source.to_string(), "src/log/record.rs:42");
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            serde_json::json!({"file": "src/log/record.rs", "line": 42})
        );

        let source = source.with_function("logx::log::record");
        assert_eq!(
            serde_json::to_value(&source).unwrap()["function"],
            "logx::log::record"
        );
    }
}
