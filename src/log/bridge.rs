//! `log` crate 转发
//!
//! 设置默认 Logger 后，第三方库通过 `log::info!` 等宏输出的日志也会经过默认 Logger
//! 的级别过滤、字段改写和格式化。转发器只安装一次，每条日志都读取当前的默认 Logger。

use crate::log::context::Context;
use crate::log::global::default_logger;
use crate::log::level::Level;
use crate::log::logger::Logger;
use crate::log::record::{Record, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INSTALL: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

struct LogBridge;

impl ::log::Log for LogBridge {
    fn enabled(&self, metadata: &::log::Metadata<'_>) -> bool {
        default_logger().enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &::log::Record<'_>) {
        let logger = default_logger();
        let level = Level::from(record.level());
        if !logger.enabled(level) {
            return;
        }

        let mut rec = Record::new(level, record.args().to_string());
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            let mut source = Source::new(file, line);
            if let Some(module) = record.module_path() {
                source = source.with_function(module);
            }
            rec = rec.with_source(source);
        }

        let _ = logger.handler().handle(&Context::background(), &rec);
    }

    fn flush(&self) {
        let _ = default_logger().handler().flush();
    }
}

/// `logger` 会输出的最宽 `log` 级别，TRACE 与 DEBUG 同级
fn max_level_of(logger: &Logger) -> ::log::LevelFilter {
    [
        (Level::DEBUG, ::log::LevelFilter::Trace),
        (Level::INFO, ::log::LevelFilter::Info),
        (Level::WARN, ::log::LevelFilter::Warn),
        (Level::ERROR, ::log::LevelFilter::Error),
    ]
    .into_iter()
    .find(|(level, _)| logger.enabled(*level))
    .map_or(::log::LevelFilter::Off, |(_, filter)| filter)
}

/// 安装转发器并按 `logger` 更新 `log` 的最大级别；已有其他 `log` 实现时保持原状
pub(crate) fn install(logger: &Logger) {
    INSTALL.call_once(|| {
        if ::log::set_boxed_logger(Box::new(LogBridge)).is_ok() {
            INSTALLED.store(true, Ordering::Release);
        }
    });

    if INSTALLED.load(Ordering::Acquire) {
        ::log::set_max_level(max_level_of(logger));
    }
}
