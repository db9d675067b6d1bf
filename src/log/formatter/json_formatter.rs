use crate::log::attr::{serialize_attrs, Attr};
use crate::log::formatter::LogFormatter;
use anyhow::Result;
use serde::{Serialize, Serializer};

/// JSON 格式化器
///
/// 每条日志输出为一个 JSON 对象，字段顺序与输入一致，分组字段输出为嵌套对象
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

struct Fields<'a>(&'a [Attr]);

impl Serialize for Fields<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_attrs(self.0, serializer)
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, fields: &[Attr]) -> Result<String> {
        Ok(serde_json::to_string(&Fields(fields))?)
    }
}
