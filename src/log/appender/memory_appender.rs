use crate::log::appender::LogAppender;
use anyhow::{anyhow, Result};
use std::sync::Mutex;

/// 内存输出器
///
/// 将日志保存在内存中，用于测试和检查输出内容
#[derive(Debug, Default)]
pub struct MemoryAppender {
    lines: Mutex<Vec<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回已输出的所有行
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// 返回最后一行
    pub fn last(&self) -> Option<String> {
        self.lines
            .lock()
            .ok()
            .and_then(|lines| lines.last().cloned())
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogAppender for MemoryAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|e| anyhow!("获取日志缓冲区锁失败: {}", e))?
            .push(formatted_message.to_string());
        Ok(())
    }
}
