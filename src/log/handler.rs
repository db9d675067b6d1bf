use crate::log::appender::LogAppender;
use crate::log::attr::{self, Attr, Value};
use crate::log::context::Context;
use crate::log::formatter::LogFormatter;
use crate::log::level::Level;
use crate::log::options::{Options, LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
use crate::log::record::Record;
use crate::log::replace::ReplaceAttr;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 日志处理器 trait
///
/// Logger 只负责构造 [`Record`]，级别过滤、字段改写、格式化和输出都由 Handler 完成
pub trait Handler: Send + Sync {
    /// 该级别的日志是否需要输出
    fn enabled(&self, level: Level) -> bool;

    /// 处理一条日志记录
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// 基于 formatter + appender 的 Handler
pub struct FormatHandler {
    level: Level,
    add_source: bool,
    replace: ReplaceAttr,
    formatter: Arc<dyn LogFormatter>,
    appender: Arc<dyn LogAppender>,
}

impl FormatHandler {
    pub fn new(
        options: Arc<Options>,
        formatter: Arc<dyn LogFormatter>,
        appender: Arc<dyn LogAppender>,
    ) -> Self {
        Self {
            level: options.log_level,
            add_source: options.capture_source(),
            replace: ReplaceAttr::new(options),
            formatter,
            appender,
        }
    }

    /// 生成输出字段：time、level、source、msg 依次在前，用户字段在后，每个字段都经过改写
    fn fields(&self, record: &Record) -> Vec<Attr> {
        let mut fields = Vec::with_capacity(4 + record.attrs.len());
        let mut groups = Vec::new();

        self.push(
            &mut fields,
            &mut groups,
            Attr::new(TIME_KEY, DateTime::<Utc>::from(record.time)),
        );
        self.push(&mut fields, &mut groups, Attr::new(LEVEL_KEY, record.level));
        if self.add_source {
            if let Some(source) = &record.source {
                self.push(&mut fields, &mut groups, Attr::new(SOURCE_KEY, source.clone()));
            }
        }
        self.push(
            &mut fields,
            &mut groups,
            attr::string(MESSAGE_KEY, record.message.as_str()),
        );

        for attr in &record.attrs {
            self.push(&mut fields, &mut groups, attr.clone());
        }

        fields
    }

    /// 分组本身不经过改写，只改写其中的成员；空分组被丢弃，key 为空的分组内联到上一层
    fn push(&self, out: &mut Vec<Attr>, groups: &mut Vec<String>, attr: Attr) {
        let Attr { key, value } = attr;
        match value {
            Value::Group(members) if key.is_empty() => {
                for member in members {
                    self.push(out, groups, member);
                }
            }
            Value::Group(members) => {
                groups.push(key.clone());
                let mut nested = Vec::with_capacity(members.len());
                for member in members {
                    self.push(&mut nested, groups, member);
                }
                groups.pop();

                if !nested.is_empty() {
                    out.push(Attr {
                        key,
                        value: Value::Group(nested),
                    });
                }
            }
            value => {
                let attr = self.replace.replace(groups, Attr { key, value });
                if !attr.key.is_empty() {
                    out.push(attr);
                }
            }
        }
    }
}

impl Handler for FormatHandler {
    /// FATAL 等原生范围之外的级别不受最低级别限制
    fn enabled(&self, level: Level) -> bool {
        !level.is_native() || level >= self.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        let fields = self.fields(record);
        let formatted = self.formatter.format(&fields)?;
        self.appender.append(&formatted)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.appender.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::appender::MemoryAppender;
    use crate::log::formatter::{JsonFormatter, TextFormatter};
    use crate::log::options::{
        with_json_format, with_log_level, with_replace_default_key_name, with_short_source,
        with_source, LoggerOption,
    };
    use crate::log::record::Source;

    fn create_test_handler(options: Vec<LoggerOption>) -> (FormatHandler, Arc<MemoryAppender>) {
        let options = Arc::new(Options::resolve(options));
        let formatter: Arc<dyn LogFormatter> = if options.json_format {
            Arc::new(JsonFormatter::new())
        } else {
            Arc::new(TextFormatter::new())
        };
        let appender = Arc::new(MemoryAppender::new());
        let handler = FormatHandler::new(options, formatter, appender.clone());
        (handler, appender)
    }

    fn handle_json(handler: &FormatHandler, appender: &MemoryAppender, record: Record) -> serde_json::Value {
        handler.handle(&Context::background(), &record).unwrap();
        serde_json::from_str(&appender.last().unwrap()).unwrap()
    }

    #[test]
    fn test_enabled() {
        let (handler, _) = create_test_handler(vec![with_log_level(Level::WARN)]);

        assert!(!handler.enabled(Level::DEBUG));
        assert!(!handler.enabled(Level::INFO));
        assert!(handler.enabled(Level::WARN));
        assert!(handler.enabled(Level::ERROR));
        assert!(handler.enabled(Level::FATAL));
    }

    #[test]
    fn test_fatal_enabled_above_error_threshold() {
        let (handler, _) = create_test_handler(vec![with_log_level(Level::new(10))]);

        assert!(!handler.enabled(Level::ERROR));
        assert!(handler.enabled(Level::FATAL));
    }

    #[test]
    fn test_default_keys_identity() {
        let (handler, appender) = create_test_handler(vec![with_json_format(true)]);

        let value = handle_json(&handler, &appender, Record::new(Level::INFO, "hello"));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();

        assert_eq!(keys.len(), 3);
        assert!(value["time"].is_string());
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["msg"], "hello");
    }

    #[test]
    fn test_text_field_order() {
        let (handler, appender) = create_test_handler(vec![with_source(true)]);

        let record = Record::new(Level::WARN, "disk almost full")
            .with_source(Source::new("src/main.rs", 7))
            .with_attr(attr::int64("usage", 93));
        handler.handle(&Context::background(), &record).unwrap();

        let line = appender.last().unwrap();
        assert!(line.starts_with("time="));
        assert!(line.ends_with(" level=WARN source=src/main.rs:7 msg=\"disk almost full\" usage=93"));
    }

    #[test]
    fn test_source_omitted_without_capture() {
        let (handler, appender) = create_test_handler(vec![with_json_format(true)]);

        let record = Record::new(Level::INFO, "hello").with_source(Source::new("src/main.rs", 7));
        let value = handle_json(&handler, &appender, record);

        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_short_source_and_renames() {
        let (handler, appender) = create_test_handler(vec![
            with_json_format(true),
            with_short_source(true),
            with_replace_default_key_name(TIME_KEY, "timestamp"),
            with_replace_default_key_name(SOURCE_KEY, "caller"),
        ]);

        let record = Record::new(Level::ERROR, "boom")
            .with_source(Source::new("/home/dev/project/src/log/handler.rs", 99));
        let value = handle_json(&handler, &appender, record);

        assert!(value["timestamp"].is_string());
        assert!(value.get("time").is_none());
        assert_eq!(value["caller"], "log/handler.rs:99");
        assert_eq!(value["level"], "ERROR");
    }

    #[test]
    fn test_fatal_level_relabel() {
        let (handler, appender) = create_test_handler(vec![
            with_json_format(true),
            with_replace_default_key_name(LEVEL_KEY, "severity"),
        ]);

        let value = handle_json(&handler, &appender, Record::new(Level::FATAL, "fatal"));
        assert_eq!(value["severity"], "FATAL");

        let value = handle_json(&handler, &appender, Record::new(Level::ERROR, "error"));
        assert_eq!(value["severity"], "ERROR");
    }

    #[test]
    fn test_groups() {
        let (handler, appender) = create_test_handler(vec![
            with_json_format(true),
            with_replace_default_key_name(TIME_KEY, "timestamp"),
        ]);

        let record = Record::new(Level::INFO, "request").with_attrs(vec![
            attr::group(
                "http",
                vec![attr::string("method", "GET"), attr::string("time", "12ms")],
            ),
            attr::group("empty", Vec::<Attr>::new()),
            attr::group("", vec![attr::int64("inlined", 1)]),
        ]);
        let value = handle_json(&handler, &appender, record);

        assert_eq!(value["http"]["method"], "GET");
        // 分组内与保留字段同名的字段同样会被改写
        assert_eq!(value["http"]["timestamp"], "12ms");
        assert!(value.get("empty").is_none());
        assert_eq!(value["inlined"], 1);
    }

    #[test]
    fn test_user_attr_with_reserved_name() {
        let (handler, appender) = create_test_handler(vec![
            with_json_format(true),
            with_replace_default_key_name(MESSAGE_KEY, "message"),
        ]);

        let record = Record::new(Level::INFO, "hello").with_attr(attr::string("user", "alice"));
        let value = handle_json(&handler, &appender, record);

        assert_eq!(value["message"], "hello");
        assert_eq!(value["user"], "alice");
    }
}
