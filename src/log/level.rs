use crate::log::error::LogError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 日志级别
///
/// 以数值表示，数值越大越严重。原生级别为 DEBUG、INFO、WARN、ERROR，
/// 相邻级别之间留有间隔，允许表达 `INFO+2` 这样的中间级别。
///
/// `FATAL` 是合成级别，位于原生范围之外（高于 ERROR），
/// 不参与最低级别过滤，只由 `fatal` 系列方法使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// 调试信息（最低级别）
    pub const DEBUG: Level = Level(-4);
    /// 一般信息
    pub const INFO: Level = Level(0);
    /// 警告信息
    pub const WARN: Level = Level(4);
    /// 错误信息（原生最高级别）
    pub const ERROR: Level = Level(8);
    /// 致命错误，输出后进程退出
    pub const FATAL: Level = Level(12);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// 是否处于原生级别范围内（不高于 ERROR）
    pub fn is_native(self) -> bool {
        self <= Level::ERROR
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" | "warning" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if *self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if *self < Level::WARN {
            ("INFO", Level::INFO)
        } else if *self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        };

        match self.0 - base.0 {
            0 => f.write_str(name),
            delta => write!(f, "{}{:+}", name, delta),
        }
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<::log::Level> for Level {
    fn from(level: ::log::Level) -> Self {
        match level {
            ::log::Level::Error => Level::ERROR,
            ::log::Level::Warn => Level::WARN,
            ::log::Level::Info => Level::INFO,
            ::log::Level::Debug | ::log::Level::Trace => Level::DEBUG,
        }
    }
}
