use crate::log::attr::{Attr, Value};
use crate::log::formatter::LogFormatter;
use anyhow::Result;
use std::fmt::{self, Write};

/// 文本格式化器
///
/// 将字段输出为 `key=value` 形式，以空格分隔：
///
/// ```text
/// time=2025-01-19T12:34:56.789Z level=INFO source=log/logger.rs:42 msg="user logged in" user_id=12345
/// ```
///
/// 分组字段展开为 `group.key=value`；包含空白、`=`、`"` 或控制字符的值会被加上引号
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, fields: &[Attr]) -> Result<String> {
        // 预分配容量：时间戳约 24 字节，其余按字段数粗略估算
        let mut result = String::with_capacity(64 + fields.len() * 24);
        write_attrs(&mut result, "", fields)?;
        Ok(result)
    }
}

fn write_attrs(buffer: &mut String, prefix: &str, attrs: &[Attr]) -> fmt::Result {
    for attr in attrs {
        match &attr.value {
            Value::Group(members) => {
                let prefix = format!("{}{}.", prefix, attr.key);
                write_attrs(buffer, &prefix, members)?;
            }
            value => {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                if prefix.is_empty() {
                    write_quoted(buffer, &attr.key)?;
                } else {
                    write_quoted(buffer, &format!("{}{}", prefix, attr.key))?;
                }
                buffer.push('=');
                write_quoted(buffer, &value.to_string())?;
            }
        }
    }
    Ok(())
}

fn write_quoted(buffer: &mut String, s: &str) -> fmt::Result {
    if needs_quoting(s) {
        write!(buffer, "{:?}", s)
    } else {
        buffer.push_str(s);
        Ok(())
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}
