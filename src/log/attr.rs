//! 结构化字段
//!
//! `Attr` 是附加到日志记录上的键值对。本模块同时提供按值类型划分的构造函数：
//!
//! - 32 位数值在存储前统一扩展为 64 位，无符号整数单独存储为 `Uint64`
//! - `*_opt` 系列接受 `Option`，`None` 会以字符串 `"nil"` 记录在原 key 下，而不是被丢弃
//!
//! # 示例
//!
//! ```
//! use logx::log::attr;
//!
//! let retries: Option<i32> = None;
//! let fields = vec![
//!     attr::string("user", "alice"),
//!     attr::int32_opt("retries", retries),
//!     attr::group("request", vec![attr::string("method", "GET")]),
//! ];
//! assert_eq!(fields[1].value.to_string(), "nil");
//! ```

use crate::log::level::Level;
use crate::log::record::Source;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// `Option` 构造函数在值缺失时写入的字面量
pub const NIL: &str = "nil";

/// `error` 构造函数使用的固定 key
pub const ERROR_KEY: &str = "error";

/// 字段值，类型在构造时确定
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// 保留字段 level 的值
    Level(Level),
    /// 保留字段 source 的值
    Source(Source),
    /// 任意可序列化的数据
    Any(serde_json::Value),
    /// 嵌套字段组
    Group(Vec<Attr>),
}

/// 结构化字段
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Uint64(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Level(level) => write!(f, "{}", level),
            Value::Source(source) => write!(f, "{}", source),
            Value::Any(serde_json::Value::String(s)) => f.write_str(s),
            Value::Any(v) => write!(f, "{}", v),
            Value::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Int64(n) => serializer.serialize_i64(*n),
            Value::Uint64(n) => serializer.serialize_u64(*n),
            Value::Float64(n) => serializer.serialize_f64(*n),
            // 以纳秒整数输出
            Value::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            Value::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Level(level) => level.serialize(serializer),
            Value::Source(source) => source.serialize(serializer),
            Value::Any(v) => v.serialize(serializer),
            Value::Group(attrs) => serialize_attrs(attrs, serializer),
        }
    }
}

/// 将字段列表按顺序序列化为 map
pub(crate) fn serialize_attrs<S>(attrs: &[Attr], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(attrs.len()))?;
    for attr in attrs {
        map.serialize_entry(&attr.key, &attr.value)?;
    }
    map.end()
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int64(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint64(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Uint64(u64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float64(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float64(n as f64)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::Level(level)
    }
}

impl From<Source> for Value {
    fn from(source: Source) -> Self {
        Value::Source(source)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Any(v)
    }
}

fn nil(key: impl Into<String>) -> Attr {
    string(key, NIL)
}

/// 布尔字段
pub fn bool(key: impl Into<String>, val: bool) -> Attr {
    Attr::new(key, Value::Bool(val))
}

/// 布尔字段，`None` 记录为 "nil"
pub fn bool_opt(key: impl Into<String>, val: Option<bool>) -> Attr {
    match val {
        Some(v) => bool(key, v),
        None => nil(key),
    }
}

/// 字符串字段
pub fn string(key: impl Into<String>, val: impl Into<String>) -> Attr {
    Attr::new(key, Value::String(val.into()))
}

/// 字符串字段，`None` 记录为 "nil"
pub fn string_opt<S: Into<String>>(key: impl Into<String>, val: Option<S>) -> Attr {
    match val {
        Some(v) => string(key, v),
        None => nil(key),
    }
}

/// 平台字长整数字段
pub fn int(key: impl Into<String>, val: isize) -> Attr {
    Attr::new(key, Value::Int64(val as i64))
}

pub fn int_opt(key: impl Into<String>, val: Option<isize>) -> Attr {
    match val {
        Some(v) => int(key, v),
        None => nil(key),
    }
}

/// 32 位整数字段（存储为 64 位）
pub fn int32(key: impl Into<String>, val: i32) -> Attr {
    Attr::new(key, Value::Int64(i64::from(val)))
}

pub fn int32_opt(key: impl Into<String>, val: Option<i32>) -> Attr {
    match val {
        Some(v) => int32(key, v),
        None => nil(key),
    }
}

pub fn int64(key: impl Into<String>, val: i64) -> Attr {
    Attr::new(key, Value::Int64(val))
}

pub fn int64_opt(key: impl Into<String>, val: Option<i64>) -> Attr {
    match val {
        Some(v) => int64(key, v),
        None => nil(key),
    }
}

/// 平台字长无符号整数字段
pub fn uint(key: impl Into<String>, val: usize) -> Attr {
    Attr::new(key, Value::Uint64(val as u64))
}

pub fn uint_opt(key: impl Into<String>, val: Option<usize>) -> Attr {
    match val {
        Some(v) => uint(key, v),
        None => nil(key),
    }
}

/// 32 位无符号整数字段（存储为 64 位）
pub fn uint32(key: impl Into<String>, val: u32) -> Attr {
    Attr::new(key, Value::Uint64(u64::from(val)))
}

pub fn uint32_opt(key: impl Into<String>, val: Option<u32>) -> Attr {
    match val {
        Some(v) => uint32(key, v),
        None => nil(key),
    }
}

pub fn uint64(key: impl Into<String>, val: u64) -> Attr {
    Attr::new(key, Value::Uint64(val))
}

pub fn uint64_opt(key: impl Into<String>, val: Option<u64>) -> Attr {
    match val {
        Some(v) => uint64(key, v),
        None => nil(key),
    }
}

/// 32 位浮点字段（存储为 64 位）
pub fn float32(key: impl Into<String>, val: f32) -> Attr {
    Attr::new(key, Value::Float64(f64::from(val)))
}

pub fn float32_opt(key: impl Into<String>, val: Option<f32>) -> Attr {
    match val {
        Some(v) => float32(key, v),
        None => nil(key),
    }
}

pub fn float64(key: impl Into<String>, val: f64) -> Attr {
    Attr::new(key, Value::Float64(val))
}

pub fn float64_opt(key: impl Into<String>, val: Option<f64>) -> Attr {
    match val {
        Some(v) => float64(key, v),
        None => nil(key),
    }
}

pub fn duration(key: impl Into<String>, val: Duration) -> Attr {
    Attr::new(key, Value::Duration(val))
}

pub fn time(key: impl Into<String>, val: DateTime<Utc>) -> Attr {
    Attr::new(key, Value::Time(val))
}

/// 任意可序列化数据
///
/// 序列化失败时记录为 "nil"
///
/// ```
/// use logx::log::attr;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// let field = attr::any("user", User { id: 1, name: "alice".to_string() });
/// assert_eq!(field.value.to_string(), r#"{"id":1,"name":"alice"}"#);
/// ```
pub fn any<T: Serialize>(key: impl Into<String>, val: T) -> Attr {
    match serde_json::to_value(val) {
        Ok(value) => Attr::new(key, Value::Any(value)),
        Err(_) => nil(key),
    }
}

/// 错误字段，固定使用 key "error"，`None` 记录为 "nil"
pub fn error(err: Option<&dyn std::error::Error>) -> Attr {
    match err {
        Some(e) => string(ERROR_KEY, e.to_string()),
        None => nil(ERROR_KEY),
    }
}

/// 字段组，将多个字段嵌套在同一个 key 下
pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Attr {
    Attr::new(key, Value::Group(attrs.into_iter().collect()))
}

pub use self::group as dict;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io;

    #[test]
    fn test_bool_opt() {
        assert_eq!(bool_opt("key", None), string("key", "nil"));
        assert_eq!(bool_opt("key", Some(true)), bool("key", true));
        assert_eq!(bool_opt("key", Some(false)), bool("key", false));
    }

    #[test]
    fn test_string_opt() {
        assert_eq!(string_opt("key", None::<&str>), string("key", "nil"));
        assert_eq!(string_opt("key", Some("test")), string("key", "test"));
        assert_eq!(string_opt("key", Some("")), string("key", ""));
    }

    #[test]
    fn test_int_opt() {
        assert_eq!(int_opt("key", None), string("key", "nil"));
        assert_eq!(int_opt("key", Some(42)), int("key", 42));
        assert_eq!(int_opt("key", Some(-1)), int("key", -1));
    }

    #[test]
    fn test_int32_widened() {
        assert_eq!(int32("key", 42).value, Value::Int64(42));
        assert_eq!(int32("key", i32::MIN).value, Value::Int64(i32::MIN as i64));
        assert_eq!(int32_opt("key", None), string("key", "nil"));
        assert_eq!(int32_opt("key", Some(-1)), int32("key", -1));
    }

    #[test]
    fn test_int64_opt() {
        assert_eq!(int64_opt("key", None), string("key", "nil"));
        assert_eq!(int64_opt("key", Some(i64::MAX)), int64("key", i64::MAX));
    }

    #[test]
    fn test_uint_opt() {
        assert_eq!(uint_opt("key", None), string("key", "nil"));
        assert_eq!(uint_opt("key", Some(42)), uint("key", 42));
        assert_eq!(uint("key", 42).value, Value::Uint64(42));
    }

    #[test]
    fn test_uint32_widened() {
        assert_eq!(uint32("key", u32::MAX).value, Value::Uint64(u64::from(u32::MAX)));
        assert_eq!(uint32_opt("key", None), string("key", "nil"));
        assert_eq!(uint32_opt("key", Some(7)), uint32("key", 7));
    }

    #[test]
    fn test_uint64_above_i64_max() {
        let attr = uint64("bytes", u64::MAX);
        assert_eq!(attr.value.to_string(), "18446744073709551615");
        assert_eq!(serde_json::to_string(&attr.value).unwrap(), "18446744073709551615");
        assert_eq!(uint64_opt("bytes", None), string("bytes", "nil"));
        assert_eq!(uint64_opt("bytes", Some(u64::MAX)), attr);
    }

    #[test]
    fn test_float32_widened() {
        assert_eq!(float32("key", 1.5).value, Value::Float64(1.5));
        assert_eq!(float32_opt("key", None), string("key", "nil"));
        assert_eq!(float32_opt("key", Some(0.25)), float32("key", 0.25));
    }

    #[test]
    fn test_float64_opt() {
        assert_eq!(float64_opt("key", None), string("key", "nil"));
        assert_eq!(float64_opt("key", Some(2.5)), float64("key", 2.5));
        match float64_opt("key", Some(f64::NAN)).value {
            Value::Float64(n) => assert!(n.is_nan()),
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn test_error() {
        assert_eq!(error(None), string("error", "nil"));

        let err = io::Error::new(io::ErrorKind::Other, "connection refused");
        assert_eq!(error(Some(&err)), string("error", "connection refused"));
    }

    #[test]
    fn test_group() {
        let attr = group(
            "request",
            vec![string("method", "GET"), int64("status", 200)],
        );

        assert_eq!(attr.key, "request");
        match &attr.value {
            Value::Group(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0], string("method", "GET"));
            }
            other => panic!("unexpected value: {:?}", other),
        }
        assert_eq!(attr.to_string(), "request=[method=GET status=200]");
        assert_eq!(dict("d", vec![bool("ok", true)]), group("d", vec![bool("ok", true)]));
    }

    #[test]
    fn test_any() {
        let attr = any("data", serde_json::json!({"nested": {"value": 123}}));
        assert_eq!(attr.value.to_string(), r#"{"nested":{"value":123}}"#);

        let attr = any("name", "alice");
        assert_eq!(attr.value, Value::Any(serde_json::Value::String("alice".to_string())));
        assert_eq!(attr.value.to_string(), "alice");

        // JSON 对象的 key 不能是元组
        let unserializable = std::collections::BTreeMap::from([((1, 2), 3)]);
        assert_eq!(any("pairs", unserializable), string("pairs", NIL));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(3.5f64).to_string(), "3.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(Duration::from_millis(1500)).to_string(), "1.5s");
        assert_eq!(Value::from(Level::WARN).to_string(), "WARN");
        assert_eq!(Value::from(Source::new("a/b.rs", 7)).to_string(), "a/b.rs:7");

        let t = Utc.with_ymd_and_hms(2025, 1, 19, 12, 34, 56).unwrap();
        assert_eq!(Value::from(t).to_string(), "2025-01-19T12:34:56.000Z");
    }

    #[test]
    fn test_time() {
        let t = Utc.with_ymd_and_hms(2025, 1, 19, 12, 34, 56).unwrap()
            + chrono::Duration::milliseconds(789);
        let attr = time("created_at", t);

        assert_eq!(attr.key, "created_at");
        assert_eq!(attr.value, Value::Time(t));
        assert_eq!(attr.to_string(), "created_at=2025-01-19T12:34:56.789Z");
        assert_eq!(
            serde_json::to_string(&attr.value).unwrap(),
            "\"2025-01-19T12:34:56.789Z\""
        );
    }

    #[test]
    fn test_value_serialize() {
        assert_eq!(serde_json::to_string(&Value::from("hello")).unwrap(), "\"hello\"");
        assert_eq!(serde_json::to_string(&Value::from(42i32)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&Value::from(Duration::from_secs(2))).unwrap(),
            "2000000000"
        );
        assert_eq!(serde_json::to_string(&Value::from(Level::FATAL)).unwrap(), "\"ERROR+4\"");

        let attr = group("user", vec![int64("id", 1), string("name", "alice")]);
        assert_eq!(
            serde_json::to_value(&attr.value).unwrap(),
            serde_json::json!({"id": 1, "name": "alice"})
        );
    }
}
