use crate::log::appender::LogAppender;
use anyhow::Result;
use std::io::{self, Write};

/// 终端输出器
///
/// 将日志逐行输出到标准输出
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl LogAppender for ConsoleAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", formatted_message)?;
        stdout.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_append() {
        let appender = ConsoleAppender::new();

        let result = appender.append("Test message");
        assert!(result.is_ok());
    }

    #[test]
    fn test_console_appender_flush() {
        let appender = ConsoleAppender::new();

        let result = appender.flush();
        assert!(result.is_ok());
    }
}
