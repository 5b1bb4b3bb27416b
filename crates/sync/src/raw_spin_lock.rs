//! 关中断自旋锁
//!
//! 获取锁时先关闭本地中断再自旋，释放时先清除锁标志再恢复中断。
//! 保存的中断状态存放在锁内部，这样它可以作为 [`lock_api::RawMutex`] 使用。

use crate::intr_guard::IntrGuard;
use core::{
    hint,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// 关中断自旋锁。
///
/// 不可重入：持锁期间在同一 CPU 上再次 `lock()` 会死锁。
/// 由于持锁时本地中断关闭，中断处理程序不会在本 CPU 上与持锁者交错执行。
#[derive(Debug)]
pub struct RawSpinLock {
    locked: AtomicBool,
    /// 持锁者进入前的中断状态，只由持锁者读写
    saved_flags: AtomicUsize,
}

impl RawSpinLock {
    /// 创建一个未上锁的 RawSpinLock。
    pub const fn new() -> Self {
        RawSpinLock {
            locked: AtomicBool::new(false),
            saved_flags: AtomicUsize::new(0),
        }
    }

    fn acquire(&self, guard: IntrGuard) {
        self.saved_flags.store(guard.into_flags(), Ordering::Relaxed);
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: 同一时刻只有一个持锁者，Acquire/Release 保证临界区内存可见性
unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSpinLock::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        let guard = IntrGuard::new();
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }
        self.acquire(guard);
    }

    fn try_lock(&self) -> bool {
        let guard = IntrGuard::new();
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            self.acquire(guard);
            true
        } else {
            // guard 在此 drop，恢复中断
            false
        }
    }

    unsafe fn unlock(&self) {
        // 必须在释放锁标志之前取出 flags，否则可能读到下一个持锁者的值
        let flags = self.saved_flags.load(Ordering::Relaxed);
        self.locked.store(false, Ordering::Release);
        // SAFETY: flags 由 lock/try_lock 通过 into_flags 保存，且只恢复一次
        drop(unsafe { IntrGuard::from_flags(flags) });
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}
