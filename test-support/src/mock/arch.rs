//! 架构相关操作的 Mock 实现
//!
//! 注意：这里不直接依赖 `sync` crate（避免循环依赖）。
//! `sync` crate 在 `cfg(test)` 下为 [`MockArchOps`] 实现 `ArchOps`。

use core::sync::atomic::{AtomicBool, Ordering};

/// Mock 的本地中断开关
pub struct MockArchOps {
    interrupt_state: AtomicBool,
}

impl MockArchOps {
    pub const fn new() -> Self {
        Self {
            interrupt_state: AtomicBool::new(true),
        }
    }

    /// 关闭中断，返回之前的状态（1 = 开启）
    ///
    /// # Safety
    /// 与真实实现保持相同的签名，本身没有额外约束
    pub unsafe fn read_and_disable_interrupts(&self) -> usize {
        self.interrupt_state.swap(false, Ordering::SeqCst) as usize
    }

    /// 恢复中断状态
    ///
    /// # Safety
    /// 与真实实现保持相同的签名，本身没有额外约束
    pub unsafe fn restore_interrupts(&self, flags: usize) {
        self.interrupt_state.store(flags != 0, Ordering::SeqCst);
    }

    pub fn interrupts_enabled(&self, flags: usize) -> bool {
        flags != 0
    }

    /// 当前中断是否开启
    pub fn enabled(&self) -> bool {
        self.interrupt_state.load(Ordering::SeqCst)
    }

    /// 恢复为初始状态（中断开启）
    pub fn reset(&self) {
        self.interrupt_state.store(true, Ordering::SeqCst);
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();
