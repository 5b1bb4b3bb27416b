//! 中断控制器的 Mock 实现
//!
//! 注意：这里不直接依赖 `mailbox` crate（避免循环依赖）。
//! `mailbox` crate 在 `cfg(test)` 下为 [`MockIrqLines`] 实现 `IrqLineOps`。
//!
//! 每条中断线对应位图中的一位，只支持 0..64 号线。

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[inline]
fn bit(line: usize) -> u64 {
    debug_assert!(line < 64, "mock irq line {} out of range", line);
    1u64 << line
}

/// Mock 的中断控制器
///
/// 记录每条线的使能/挂起状态、ack 与 trigger 次数，并支持按线注入失败。
pub struct MockIrqLines {
    enabled: AtomicU64,
    pending: AtomicU64,
    triggered: AtomicU64,
    acks: AtomicUsize,
    triggers: AtomicUsize,
    fail_enable: AtomicU64,
    fail_disable: AtomicU64,
    fail_ack: AtomicU64,
}

impl MockIrqLines {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicU64::new(0),
            pending: AtomicU64::new(0),
            triggered: AtomicU64::new(0),
            acks: AtomicUsize::new(0),
            triggers: AtomicUsize::new(0),
            fail_enable: AtomicU64::new(0),
            fail_disable: AtomicU64::new(0),
            fail_ack: AtomicU64::new(0),
        }
    }

    /// 使能中断线，注入失败时返回 false
    pub fn enable_line(&self, line: usize) -> bool {
        if self.fail_enable.load(Ordering::SeqCst) & bit(line) != 0 {
            return false;
        }
        self.enabled.fetch_or(bit(line), Ordering::SeqCst);
        true
    }

    /// 关闭中断线，注入失败时返回 false
    pub fn disable_line(&self, line: usize) -> bool {
        if self.fail_disable.load(Ordering::SeqCst) & bit(line) != 0 {
            return false;
        }
        self.enabled.fetch_and(!bit(line), Ordering::SeqCst);
        true
    }

    pub fn is_enabled(&self, line: usize) -> bool {
        self.enabled.load(Ordering::SeqCst) & bit(line) != 0
    }

    /// 清除挂起位，注入失败时返回 false 且挂起位保持不变
    pub fn ack_line(&self, line: usize) -> bool {
        self.acks.fetch_add(1, Ordering::SeqCst);
        if self.fail_ack.load(Ordering::SeqCst) & bit(line) != 0 {
            return false;
        }
        self.pending.fetch_and(!bit(line), Ordering::SeqCst);
        true
    }

    /// 向对端发出信号
    pub fn trigger_line(&self, line: usize) -> bool {
        self.triggers.fetch_add(1, Ordering::SeqCst);
        self.triggered.fetch_or(bit(line), Ordering::SeqCst);
        true
    }

    /// 模拟硬件在该线上产生中断：置位挂起位。
    ///
    /// 返回控制器是否会因此调用中断入口（即该线已使能）。
    pub fn raise(&self, line: usize) -> bool {
        self.pending.fetch_or(bit(line), Ordering::SeqCst);
        self.is_enabled(line)
    }

    pub fn is_pending(&self, line: usize) -> bool {
        self.pending.load(Ordering::SeqCst) & bit(line) != 0
    }

    pub fn was_triggered(&self, line: usize) -> bool {
        self.triggered.load(Ordering::SeqCst) & bit(line) != 0
    }

    pub fn ack_count(&self) -> usize {
        self.acks.load(Ordering::SeqCst)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.load(Ordering::SeqCst)
    }

    /// 让该线上的 enable 操作失败
    pub fn fail_enable_on(&self, line: usize) {
        self.fail_enable.fetch_or(bit(line), Ordering::SeqCst);
    }

    /// 让该线上的 disable 操作失败
    pub fn fail_disable_on(&self, line: usize) {
        self.fail_disable.fetch_or(bit(line), Ordering::SeqCst);
    }

    /// 让该线上的 ack 操作失败
    pub fn fail_ack_on(&self, line: usize) {
        self.fail_ack.fetch_or(bit(line), Ordering::SeqCst);
    }
}

impl Default for MockIrqLines {
    fn default() -> Self {
        Self::new()
    }
}
