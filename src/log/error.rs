use thiserror::Error;

/// 日志模块错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}
