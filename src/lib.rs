//! logx - 结构化日志库
//!
//! 在可替换的 Handler 之上提供一层简单的日志 API：
//! 通过配置项构建 Logger，支持文本/JSON 输出、调用点、保留字段重命名、
//! FATAL 级别、进程默认 Logger 和上下文传递。
//!
//! ## 模块
//!
//! - **log**: 日志模块（Logger、字段构造器、格式化和输出）
//!
//! ```no_run
//! use logx::{attr, Level, Logger};
//! use logx::log::{with_json_format, with_log_level};
//!
//! let logger = Logger::new([with_log_level(Level::INFO), with_json_format(true)]);
//! logger.infom("started", vec![attr::string("version", "0.1.0")]);
//! ```

pub mod log;

// 重新导出主要的公共 API
pub use crate::log::attr;
pub use crate::log::{
    default_logger, logger_from_context, set_default, with_logger, Attr, Context, Level, LogError,
    Logger, LoggerConfig, LoggerOption, Value,
};
