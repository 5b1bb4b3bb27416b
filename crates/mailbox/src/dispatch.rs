//! 分发表
//!
//! 每个稠密下标对应一个 [`DispatchEntry`]，各自由一把关中断自旋锁保护。
//! 表长在构造时确定，之后不再增删条目，只通过 register/unregister 改写内容。
//!
//! 中断入口在锁内复制条目、出锁后再调用回调，因此回调内部可以再次调用
//! register / set_enabled 等接口而不会死锁。

use alloc::vec::Vec;
use sync::SpinLock;

use crate::{CallbackError, Channel};

/// mailbox 回调
///
/// 参数依次为触发的物理线号和注册时给出的不透明上下文。
/// 回调运行在中断上下文中：不得阻塞，也不得 panic。
pub type MailboxCallback = fn(Channel, usize) -> Result<(), CallbackError>;

/// 分发表条目
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchEntry {
    /// 已注册的回调，`None` 表示空条目
    pub callback: Option<MailboxCallback>,
    /// 注册时给出的不透明上下文
    pub context: usize,
}

impl DispatchEntry {
    /// 空条目
    pub const EMPTY: Self = DispatchEntry {
        callback: None,
        context: 0,
    };

    /// 绑定回调与上下文的条目
    pub const fn new(callback: MailboxCallback, context: usize) -> Self {
        DispatchEntry {
            callback: Some(callback),
            context,
        }
    }

    /// 是否已绑定回调
    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }
}

/// 按稠密下标寻址的分发表
pub(crate) struct DispatchTable {
    entries: Vec<SpinLock<DispatchEntry>>,
}

impl DispatchTable {
    /// 创建 `len` 个空条目
    pub(crate) fn new(len: usize) -> Self {
        let mut entries = Vec::with_capacity(len);
        entries.resize_with(len, || SpinLock::new(DispatchEntry::EMPTY));
        DispatchTable { entries }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn slot(&self, idx: usize) -> Option<&SpinLock<DispatchEntry>> {
        self.entries.get(idx)
    }

    /// 读取条目的副本
    pub(crate) fn get(&self, idx: usize) -> Option<DispatchEntry> {
        self.slot(idx).map(|slot| *slot.lock())
    }

    /// 覆盖条目，返回旧值
    pub(crate) fn replace(&self, idx: usize, entry: DispatchEntry) -> Option<DispatchEntry> {
        self.slot(idx)
            .map(|slot| core::mem::replace(&mut *slot.lock(), entry))
    }
}
