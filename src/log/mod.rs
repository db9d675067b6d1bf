//! 日志模块
//!
//! 结构化日志，支持文本和 JSON 两种格式，输出到标准输出。
//!
//! # 特性
//!
//! - 日志级别：DEBUG、INFO、WARN、ERROR，以及记录后退出进程的 FATAL
//! - 可选的调用点输出，支持只保留最后一级目录的短格式
//! - 保留字段（time、source、msg、level）可以重命名
//! - 类型化的字段构造器，`Option` 为空时输出 `nil`
//! - 进程默认 Logger，以及通过 [`Context`] 沿调用链传递 Logger
//! - 支持从 JSON5/YAML/TOML 配置文件构建
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use logx::log::*;
//!
//! let logger = Logger::new([
//!     with_log_level(Level::INFO),
//!     with_short_source(true),
//!     with_json_format(true),
//!     with_replace_default_key_name(TIME_KEY, "timestamp"),
//!     with_set_default(true),
//! ]);
//!
//! logger.infom(
//!     "user logged in",
//!     vec![attr::int64("user_id", 12345), attr::string("username", "alice")],
//! );
//!
//! // 通过默认 logger 输出
//! warn("disk almost full");
//! ```

pub mod appender;
pub mod attr;
mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod formatter;
pub mod global;
pub mod handler;
pub mod level;
pub mod logger;
pub mod options;
pub mod record;
pub mod replace;

// 重新导出核心类型
pub use appender::{ConsoleAppender, LogAppender, MemoryAppender};
pub use attr::{Attr, Value};
pub use config::LoggerConfig;
pub use context::{logger_from_context, with_logger, Context};
pub use error::LogError;
pub use formatter::{JsonFormatter, LogFormatter, TextFormatter};
pub use handler::{FormatHandler, Handler};
pub use level::Level;
pub use logger::Logger;
pub use options::{
    with_json_format, with_log_level, with_replace_default_key_name, with_set_default,
    with_short_source, with_source, LoggerOption, Options, LEVEL_KEY, MESSAGE_KEY,
    RESERVED_KEYS, SOURCE_KEY, TIME_KEY,
};
pub use record::{Record, Source};
pub use replace::{shorten_path, ReplaceAttr, FATAL_LABEL};

// 重新导出默认 logger 的便捷函数
pub use global::{
    debug, debugm, default_logger, error, errorm, fatal, fatal_context, fatalm, info, infom, log,
    log_context, logm, set_default, warn, warnm,
};
