//! 进程默认 Logger
//!
//! 进程内只有一个默认 Logger 槽位，通过 [`set_default`]（或构建时传入
//! [`with_set_default(true)`](crate::log::with_set_default)）设置，后设置的覆盖先设置的。
//! 通常在进程启动时设置一次，之后只读。
//!
//! 未设置前，槽位中是一个输出到标准输出、INFO 级别的文本 Logger，
//! 因此 [`default_logger`] 总是返回可用的 Logger。

use crate::log::attr::Attr;
use crate::log::bridge;
use crate::log::context::Context;
use crate::log::level::Level;
use crate::log::logger::Logger;
use crate::log::options::with_log_level;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::panic::Location;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<ArcSwap<Logger>> =
    Lazy::new(|| ArcSwap::from_pointee(Logger::new([with_log_level(Level::INFO)])));

/// 设置进程默认 Logger
///
/// 同时会把 `log` crate 的宏（`log::info!` 等）转发到默认 Logger
pub fn set_default(logger: Arc<Logger>) {
    bridge::install(&logger);
    DEFAULT_LOGGER.store(logger);
}

/// 获取进程默认 Logger
pub fn default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

// ========== 默认 logger 的便捷 log 方法 ==========

/// 使用默认 logger 记录日志
#[track_caller]
pub fn log(level: Level, message: impl Into<String>) {
    default_logger().log(level, message)
}

/// 使用默认 logger 记录带字段的日志
#[track_caller]
pub fn logm(level: Level, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().logm(level, message, attrs)
}

/// 使用默认 logger 记录带上下文的日志
#[track_caller]
pub fn log_context(
    ctx: &Context,
    level: Level,
    message: impl Into<String>,
    attrs: impl IntoIterator<Item = Attr>,
) {
    default_logger().log_context(ctx, level, message, attrs)
}

#[track_caller]
pub fn debug(message: impl Into<String>) {
    default_logger().debug(message)
}

#[track_caller]
pub fn info(message: impl Into<String>) {
    default_logger().info(message)
}

#[track_caller]
pub fn warn(message: impl Into<String>) {
    default_logger().warn(message)
}

#[track_caller]
pub fn error(message: impl Into<String>) {
    default_logger().error(message)
}

#[track_caller]
pub fn debugm(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().debugm(message, attrs)
}

#[track_caller]
pub fn infom(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().infom(message, attrs)
}

#[track_caller]
pub fn warnm(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().warnm(message, attrs)
}

#[track_caller]
pub fn errorm(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().errorm(message, attrs)
}

/// 使用默认 logger 记录 FATAL 级别日志并退出进程
///
/// 调用前应先通过 [`set_default`] 设置默认 logger，否则使用内置的文本 logger
#[track_caller]
pub fn fatal(message: impl Into<String>) -> ! {
    default_logger().fatal_at(None, message.into(), Vec::new(), Location::caller())
}

#[track_caller]
pub fn fatalm(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> ! {
    default_logger().fatal_at(
        None,
        message.into(),
        attrs.into_iter().collect(),
        Location::caller(),
    )
}

#[track_caller]
pub fn fatal_context(
    ctx: Option<&Context>,
    message: impl Into<String>,
    attrs: impl IntoIterator<Item = Attr>,
) -> ! {
    default_logger().fatal_at(
        ctx,
        message.into(),
        attrs.into_iter().collect(),
        Location::caller(),
    )
}
