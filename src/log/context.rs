//! 调用链上下文
//!
//! [`Context`] 是一条不可变的链表，每个节点以类型为 key 保存一个值，
//! 派生新节点不会修改原有上下文。Logger 通过私有 key 保存在上下文中，
//! 沿调用链显式传递：
//!
//! ```
//! use logx::log::{logger_from_context, with_logger, Context, Logger};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new(Vec::new()));
//! let ctx = with_logger(&Context::background(), logger.clone());
//!
//! // 在下游函数中取回
//! let found = logger_from_context(Some(&ctx));
//! assert!(Arc::ptr_eq(&found, &logger));
//! ```

use crate::log::global::default_logger;
use crate::log::logger::Logger;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Node {
    parent: Option<Arc<Node>>,
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
}

/// 调用链上下文
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

impl Context {
    /// 空的根上下文
    pub fn background() -> Self {
        Self::default()
    }

    /// 派生一个在 key `K` 下保存 `value` 的子上下文
    pub fn with_value<K: 'static>(&self, value: impl Any + Send + Sync) -> Self {
        Self {
            node: Some(Arc::new(Node {
                parent: self.node.clone(),
                key: TypeId::of::<K>(),
                value: Box::new(value),
            })),
        }
    }

    /// 查找最近一个 key 为 `K` 的节点，值类型不是 `V` 时返回 None
    pub fn value<K: 'static, V: 'static>(&self) -> Option<&V> {
        let key = TypeId::of::<K>();
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            if node.key == key {
                return node.value.downcast_ref::<V>();
            }
            current = node.parent.as_deref();
        }
        None
    }

    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth()).finish()
    }
}

/// 只在本模块内可见，保证不会与其他 key 冲突
struct LoggerKey;

/// 将 logger 保存到上下文中，返回派生出的新上下文
pub fn with_logger(ctx: &Context, logger: Arc<Logger>) -> Context {
    ctx.with_value::<LoggerKey>(logger)
}

/// 从上下文中取出 logger
///
/// 上下文为空或没有保存 logger 时返回进程默认 logger，因此总能得到一个可用的 logger
pub fn logger_from_context(ctx: Option<&Context>) -> Arc<Logger> {
    let background = Context::background();
    let ctx = ctx.unwrap_or(&background);

    match ctx.value::<LoggerKey, Arc<Logger>>() {
        Some(logger) => Arc::clone(logger),
        None => default_logger(),
    }
}
