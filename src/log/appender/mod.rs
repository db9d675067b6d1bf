mod console_appender;
mod memory_appender;
mod trait_;

pub use console_appender::ConsoleAppender;
pub use memory_appender::MemoryAppender;
pub use trait_::LogAppender;
