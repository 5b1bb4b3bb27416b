//! 中断保护器
//!
//! 创建时关闭本地中断，销毁时恢复进入前的状态。
//!
//! 注意：只能阻止**本地 CPU** 上“普通上下文 vs 中断处理程序”的并发，
//! 其他 CPU 的并行访问仍需要配合 [`RawSpinLock`](crate::RawSpinLock)。

use crate::arch_ops;

/// 中断保护器，基于 RAII 实现本地中断屏蔽。
///
/// # 示例
/// ```ignore
/// {
///     let _guard = IntrGuard::new(); // 关闭本地中断
///     // 临界区
/// } // 恢复进入前的中断状态
/// ```
pub struct IntrGuard {
    flags: usize,
}

impl IntrGuard {
    /// 关闭本地中断并保存之前的状态。
    pub fn new() -> Self {
        // SAFETY: 保存的 flags 只会在 drop 时原样恢复
        let flags = unsafe { arch_ops().read_and_disable_interrupts() };
        IntrGuard { flags }
    }

    /// 进入临界区前中断是否处于开启状态
    pub fn was_enabled(&self) -> bool {
        arch_ops().interrupts_enabled(self.flags)
    }

    /// 交出保存的 flags 而不恢复中断状态。
    ///
    /// 用于把中断状态的恢复推迟到保护器作用域之外（例如锁的 unlock）。
    pub(crate) fn into_flags(self) -> usize {
        let flags = self.flags;
        core::mem::forget(self);
        flags
    }

    /// 由 [`IntrGuard::into_flags`] 交出的 flags 重建保护器。
    ///
    /// # Safety
    /// flags 必须来自 `into_flags`，且每个 flags 只能重建一次
    pub(crate) unsafe fn from_flags(flags: usize) -> Self {
        IntrGuard { flags }
    }
}

impl Default for IntrGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        // SAFETY: flags 是创建时由 read_and_disable_interrupts 返回的
        unsafe { arch_ops().restore_interrupts(self.flags) };
    }
}
