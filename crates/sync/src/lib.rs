//! 中断安全的同步原语
//!
//! 为 mailbox 子系统提供“普通上下文 vs 中断上下文”之间共享数据所需的最小原语：
//!
//! - [`IntrGuard`] - RAII 风格的本地中断屏蔽
//! - [`RawSpinLock`] - 获取时屏蔽本地中断的自旋锁，实现了 [`lock_api::RawMutex`]
//! - [`SpinLock`] - 基于 `lock_api::Mutex` 的数据锁
//!
//! 所有原语都不会睡眠，持锁期间本地中断保持关闭，因此可以在中断处理程序中使用。
//!
//! # 架构依赖
//!
//! 此 crate 通过 [`ArchOps`] trait 抽象 CPU 本地中断开关。
//! 使用前必须调用 [`register_arch_ops`] 注册实现。

#![no_std]

mod intr_guard;
mod raw_spin_lock;
mod spin_lock;

pub use intr_guard::IntrGuard;
pub use raw_spin_lock::RawSpinLock;
pub use spin_lock::{SpinLock, SpinLockGuard};

use core::sync::atomic::{AtomicUsize, Ordering};

/// 架构相关的本地中断操作
///
/// 由内核（或测试）实现并注册。
pub trait ArchOps: Send + Sync {
    /// 读取并关闭本地中断，返回之前的中断状态
    ///
    /// # Safety
    /// 返回值只能原样交给 [`ArchOps::restore_interrupts`]
    unsafe fn read_and_disable_interrupts(&self) -> usize;

    /// 恢复本地中断状态
    ///
    /// # Safety
    /// flags 必须是之前 [`ArchOps::read_and_disable_interrupts`] 返回的值
    unsafe fn restore_interrupts(&self, flags: usize);

    /// 判断保存的 flags 中中断是否处于开启状态
    fn interrupts_enabled(&self, flags: usize) -> bool;
}

static ARCH_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static ARCH_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册架构操作实现
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_arch_ops(ops: &'static dyn ArchOps) {
    let ptr = ops as *const dyn ArchOps;
    // SAFETY: fat pointer 的布局是 (data, vtable)
    let (data, vtable) = unsafe { core::mem::transmute::<*const dyn ArchOps, (usize, usize)>(ptr) };
    ARCH_OPS_VTABLE.store(vtable, Ordering::Release);
    ARCH_OPS_DATA.store(data, Ordering::Release);
}

/// 获取已注册的架构操作实例
///
/// # Panics
/// 如果尚未调用 [`register_arch_ops`]，则 panic
#[inline]
pub(crate) fn arch_ops() -> &'static dyn ArchOps {
    let data = ARCH_OPS_DATA.load(Ordering::Acquire);
    let vtable = ARCH_OPS_VTABLE.load(Ordering::Acquire);
    if data == 0 {
        #[cfg(test)]
        {
            extern crate test_support;
            return &test_support::mock::arch::MOCK_ARCH_OPS;
        }
        #[cfg(not(test))]
        panic!("sync: ArchOps not registered, call register_arch_ops first");
    }
    // SAFETY: data 和 vtable 由 register_arch_ops 写入
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn ArchOps>((data, vtable)) }
}

#[cfg(test)]
mod tests;
