use crate::log::appender::{ConsoleAppender, LogAppender};
use crate::log::attr::Attr;
use crate::log::config::LoggerConfig;
use crate::log::context::Context;
use crate::log::error::LogError;
use crate::log::formatter::{JsonFormatter, LogFormatter, TextFormatter};
use crate::log::global;
use crate::log::handler::{FormatHandler, Handler};
use crate::log::level::Level;
use crate::log::options::{LoggerOption, Options};
use crate::log::record::{Record, Source};
use std::panic::Location;
use std::sync::Arc;

/// 核心日志器
///
/// 由一组 [`LoggerOption`] 构建，持有唯一的 [`Handler`]。可以在多个线程间共享，
/// 输出失败会被忽略，不会影响业务逻辑。
///
/// 所有输出方法都标注了 `#[track_caller]`，开启调用点输出时记录的是调用方的位置。
///
/// # 示例
///
/// ```no_run
/// use logx::log::*;
///
/// let logger = Logger::new([
///     with_log_level(Level::DEBUG),
///     with_short_source(true),
///     with_json_format(true),
///     with_replace_default_key_name(TIME_KEY, "timestamp"),
///     with_replace_default_key_name(SOURCE_KEY, "caller"),
///     with_set_default(true),
/// ]);
///
/// logger.debugm("debug message", vec![attr::string("key", "debug")]);
/// logger.info("info message");
/// ```
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    /// 按配置项构建输出到标准输出的 Logger
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        Self::with_appender(Arc::new(ConsoleAppender::new()), options)
    }

    /// 按配置项构建输出到指定 appender 的 Logger
    pub fn with_appender(
        appender: Arc<dyn LogAppender>,
        options: impl IntoIterator<Item = LoggerOption>,
    ) -> Self {
        let options = Arc::new(Options::resolve(options));

        let formatter: Arc<dyn LogFormatter> = if options.json_format {
            Arc::new(JsonFormatter::new())
        } else {
            Arc::new(TextFormatter::new())
        };

        let set_default = options.set_default;
        let logger = Self::from_handler(Arc::new(FormatHandler::new(
            options, formatter, appender,
        )));

        if set_default {
            global::set_default(Arc::new(logger.clone()));
        }

        logger
    }

    /// 从声明式配置构建
    pub fn from_config(config: LoggerConfig) -> Result<Self, LogError> {
        Ok(Self::new(config.into_options()?))
    }

    /// 使用自定义 Handler
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    fn emit(
        &self,
        ctx: &Context,
        level: Level,
        message: String,
        attrs: Vec<Attr>,
        location: &Location<'_>,
    ) {
        if !self.handler.enabled(level) {
            return;
        }

        let record = Record::new(level, message)
            .with_source(Source::from(location))
            .with_attrs(attrs);

        // 日志输出失败不影响调用方
        let _ = self.handler.handle(ctx, &record);
    }

    /// 记录日志
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.emit(
            &Context::background(),
            level,
            message.into(),
            Vec::new(),
            Location::caller(),
        );
    }

    /// 记录带字段的日志
    ///
    /// ```ignore
    /// logger.logm(
    ///     Level::INFO,
    ///     "user logged in",
    ///     vec![attr::int64("user_id", 12345), attr::string("username", "alice")],
    /// );
    /// ```
    #[track_caller]
    pub fn logm(
        &self,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        self.emit(
            &Context::background(),
            level,
            message.into(),
            attrs.into_iter().collect(),
            Location::caller(),
        );
    }

    /// 记录带上下文的日志，上下文会传给 Handler
    #[track_caller]
    pub fn log_context(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        self.emit(
            ctx,
            level,
            message.into(),
            attrs.into_iter().collect(),
            Location::caller(),
        );
    }

    /// 记录 DEBUG 级别日志
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::DEBUG, message);
    }

    /// 记录 INFO 级别日志
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::INFO, message);
    }

    /// 记录 WARN 级别日志
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::WARN, message);
    }

    /// 记录 ERROR 级别日志
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::ERROR, message);
    }

    /// 记录 DEBUG 级别日志（带字段）
    #[track_caller]
    pub fn debugm(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.logm(Level::DEBUG, message, attrs);
    }

    /// 记录 INFO 级别日志（带字段）
    #[track_caller]
    pub fn infom(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.logm(Level::INFO, message, attrs);
    }

    /// 记录 WARN 级别日志（带字段）
    #[track_caller]
    pub fn warnm(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.logm(Level::WARN, message, attrs);
    }

    /// 记录 ERROR 级别日志（带字段）
    #[track_caller]
    pub fn errorm(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.logm(Level::ERROR, message, attrs);
    }

    /// 记录 FATAL 级别日志并以状态码 1 退出进程
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.fatal_at(None, message.into(), Vec::new(), Location::caller())
    }

    /// 记录 FATAL 级别日志（带字段）并退出进程
    #[track_caller]
    pub fn fatalm(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> ! {
        self.fatal_at(
            None,
            message.into(),
            attrs.into_iter().collect(),
            Location::caller(),
        )
    }

    /// 记录 FATAL 级别日志并退出进程，`ctx` 为空时使用空的根上下文
    #[track_caller]
    pub fn fatal_context(
        &self,
        ctx: Option<&Context>,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> ! {
        self.fatal_at(
            ctx,
            message.into(),
            attrs.into_iter().collect(),
            Location::caller(),
        )
    }

    pub(crate) fn fatal_at(
        &self,
        ctx: Option<&Context>,
        message: String,
        attrs: Vec<Attr>,
        location: &Location<'_>,
    ) -> ! {
        self.emit_fatal(ctx, message, attrs, location);
        std::process::exit(1)
    }

    /// 输出 FATAL 记录并刷新，不退出进程
    pub(crate) fn emit_fatal(
        &self,
        ctx: Option<&Context>,
        message: String,
        attrs: Vec<Attr>,
        location: &Location<'_>,
    ) {
        let background = Context::background();
        let ctx = ctx.unwrap_or(&background);

        self.emit(ctx, Level::FATAL, message, attrs, location);
        let _ = self.handler.flush();
    }
}
