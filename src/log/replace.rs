//! 字段改写
//!
//! Handler 输出每个字段前都会调用 [`ReplaceAttr::replace`]：
//!
//! 1. key 不在重命名表中（用户自定义字段）时原样返回
//! 2. source 字段且开启了短路径时，输出 `<上级目录>/<文件名>:<行号>`
//! 3. level 字段的值为 [`Level::FATAL`] 时，输出字面量 `"FATAL"`
//! 4. 其余保留字段只做重命名

use crate::log::attr::{self, Attr, Value};
use crate::log::level::Level;
use crate::log::options::{Options, LEVEL_KEY, SOURCE_KEY};
use std::sync::Arc;

/// FATAL 级别在输出中的名称
pub const FATAL_LABEL: &str = "FATAL";

/// 字段改写器，持有构建完成后冻结的配置
#[derive(Debug, Clone)]
pub struct ReplaceAttr {
    options: Arc<Options>,
}

impl ReplaceAttr {
    pub fn new(options: Arc<Options>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// 改写单个字段
    ///
    /// `groups` 为字段所在的分组路径，保留字段的判断与分组无关
    pub fn replace(&self, _groups: &[String], attr: Attr) -> Attr {
        let Some(new_key) = self.options.replace_attrs.get(&attr.key) else {
            return attr;
        };

        if attr.key == SOURCE_KEY && self.options.add_short_source {
            return short_source_attr(attr, new_key);
        }

        if attr.key == LEVEL_KEY {
            return replace_level(attr, new_key);
        }

        rename(attr, new_key)
    }
}

fn rename(attr: Attr, new_key: &str) -> Attr {
    Attr {
        key: new_key.to_string(),
        value: attr.value,
    }
}

/// 非调用点类型的值退化为普通重命名
fn short_source_attr(attr: Attr, new_key: &str) -> Attr {
    match attr.value {
        Value::Source(source) => attr::string(
            new_key,
            format!("{}:{}", shorten_path(&source.file), source.line),
        ),
        value => Attr {
            key: new_key.to_string(),
            value,
        },
    }
}

/// 按值判断，只有 FATAL 级别才会被替换
fn replace_level(attr: Attr, new_key: &str) -> Attr {
    match attr.value {
        Value::Level(level) if level == Level::FATAL => attr::string(new_key, FATAL_LABEL),
        value => Attr {
            key: new_key.to_string(),
            value,
        },
    }
}

/// 缩短文件路径，只保留直接上级目录和文件名
///
/// 同时接受 `/` 和 `\` 分隔符，`.` 和 `..` 会先被规整；
/// 没有上级目录时只返回文件名
///
/// ```
/// use logx::log::shorten_path;
///
/// assert_eq!(shorten_path("/home/dev/project/src/log/logger.rs"), "log/logger.rs");
/// assert_eq!(shorten_path("main.rs"), "main.rs");
/// ```
pub fn shorten_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." if parts.last().is_some_and(|last| *last != "..") => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    match parts.as_slice() {
        [] => String::new(),
        [file] => file.to_string(),
        [.., dir, file] => format!("{}/{}", dir, file),
    }
}
