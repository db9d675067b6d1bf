use crate::log::level::Level;
use smart_default::SmartDefault;
use std::collections::HashMap;

/// 保留字段：时间戳
pub const TIME_KEY: &str = "time";
/// 保留字段：调用点
pub const SOURCE_KEY: &str = "source";
/// 保留字段：日志消息
pub const MESSAGE_KEY: &str = "msg";
/// 保留字段：日志级别
pub const LEVEL_KEY: &str = "level";

/// 可以被重命名的保留字段
pub const RESERVED_KEYS: [&str; 4] = [TIME_KEY, SOURCE_KEY, MESSAGE_KEY, LEVEL_KEY];

fn default_replace_attrs() -> HashMap<String, String> {
    RESERVED_KEYS
        .iter()
        .map(|key| (key.to_string(), key.to_string()))
        .collect()
}

/// Logger 构建配置
///
/// 每次构建 Logger 时从默认值开始，依次应用 [`LoggerOption`]，构建完成后不再变化
#[derive(Debug, Clone, PartialEq, SmartDefault)]
pub struct Options {
    /// 最低输出级别
    #[default(Level::DEBUG)]
    pub log_level: Level,

    /// 是否输出调用点
    pub add_source: bool,

    /// 是否输出缩短后的调用点（隐含 add_source）
    pub add_short_source: bool,

    /// 是否使用 JSON 格式，否则使用文本格式
    pub json_format: bool,

    /// 是否设置为进程默认 Logger
    pub set_default: bool,

    /// 保留字段重命名表，初始为四个保留字段的恒等映射
    #[default(default_replace_attrs())]
    pub replace_attrs: HashMap<String, String>,
}

/// 配置项，按传入顺序修改 [`Options`]，后者覆盖前者
pub type LoggerOption = Box<dyn FnOnce(&mut Options) + Send>;

impl Options {
    /// 从默认值开始依次应用配置项
    pub fn resolve(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            option(&mut config);
        }
        config
    }

    /// 是否需要采集调用点
    pub fn capture_source(&self) -> bool {
        self.add_source || self.add_short_source
    }
}

/// 设置最低输出级别
pub fn with_log_level(level: Level) -> LoggerOption {
    Box::new(move |o: &mut Options| o.log_level = level)
}

/// 开启/关闭调用点输出
pub fn with_source(source: bool) -> LoggerOption {
    Box::new(move |o: &mut Options| o.add_source = source)
}

/// 开启/关闭缩短的调用点输出，只保留最后一级目录和文件名
pub fn with_short_source(short_source: bool) -> LoggerOption {
    Box::new(move |o: &mut Options| o.add_short_source = short_source)
}

/// 使用 JSON 格式输出
pub fn with_json_format(format: bool) -> LoggerOption {
    Box::new(move |o: &mut Options| o.json_format = format)
}

/// 构建完成后设置为进程默认 Logger
pub fn with_set_default(set_default: bool) -> LoggerOption {
    Box::new(move |o: &mut Options| o.set_default = set_default)
}

/// 重命名保留字段
///
/// 只能修改已有的保留字段，未知的 key 会被忽略
///
/// ```
/// use logx::log::{with_replace_default_key_name, Options, TIME_KEY};
///
/// let options = Options::resolve([
///     with_replace_default_key_name(TIME_KEY, "timestamp"),
///     with_replace_default_key_name("unknown", "ignored"),
/// ]);
/// assert_eq!(options.replace_attrs[TIME_KEY], "timestamp");
/// assert!(!options.replace_attrs.contains_key("unknown"));
/// ```
pub fn with_replace_default_key_name(
    key_name: impl Into<String>,
    replace_key_name: impl Into<String>,
) -> LoggerOption {
    let key_name = key_name.into();
    let replace_key_name = replace_key_name.into();
    Box::new(move |o: &mut Options| {
        if let Some(entry) = o.replace_attrs.get_mut(&key_name) {
            *entry = replace_key_name;
        }
    })
}
