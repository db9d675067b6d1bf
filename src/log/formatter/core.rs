use crate::log::attr::Attr;
use anyhow::Result;

/// 日志格式化器 trait
///
/// 负责将改写后的字段列表（依次为 time、level、source、msg 和用户字段）格式化为一行字符串
pub trait LogFormatter: Send + Sync {
    /// 格式化字段列表
    fn format(&self, fields: &[Attr]) -> Result<String>;
}
