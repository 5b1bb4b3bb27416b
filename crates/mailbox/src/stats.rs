//! 中断入口统计
//!
//! 回调失败、ack 失败和伪中断都不会向外返回错误，只在这里计数并写日志。

use core::sync::atomic::{AtomicUsize, Ordering};

/// 中断入口计数器
#[derive(Debug, Default)]
pub struct MailboxStats {
    dispatched: AtomicUsize,
    unhandled: AtomicUsize,
    spurious: AtomicUsize,
    callback_failures: AtomicUsize,
    ack_failures: AtomicUsize,
}

/// [`MailboxStats`] 的快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MailboxStatsSnapshot {
    /// 成功调用回调的次数（包括返回错误的回调）
    pub dispatched: usize,
    /// 线上没有注册回调的中断次数
    pub unhandled: usize,
    /// 线号不在 ChannelMask 中的中断次数
    pub spurious: usize,
    /// 回调返回错误的次数
    pub callback_failures: usize,
    /// 清除挂起状态失败的次数
    pub ack_failures: usize,
}

impl MailboxStats {
    /// 全零计数器
    pub const fn new() -> Self {
        MailboxStats {
            dispatched: AtomicUsize::new(0),
            unhandled: AtomicUsize::new(0),
            spurious: AtomicUsize::new(0),
            callback_failures: AtomicUsize::new(0),
            ack_failures: AtomicUsize::new(0),
        }
    }

    pub(crate) fn inc_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_unhandled(&self) {
        self.unhandled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_spurious(&self) {
        self.spurious.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_callback_failures(&self) {
        self.callback_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_ack_failures(&self) {
        self.ack_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// 读取当前计数
    pub fn snapshot(&self) -> MailboxStatsSnapshot {
        MailboxStatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            unhandled: self.unhandled.load(Ordering::Relaxed),
            spurious: self.spurious.load(Ordering::Relaxed),
            callback_failures: self.callback_failures.load(Ordering::Relaxed),
            ack_failures: self.ack_failures.load(Ordering::Relaxed),
        }
    }
}
