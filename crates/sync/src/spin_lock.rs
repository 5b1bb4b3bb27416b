//! 数据自旋锁
//!
//! `lock_api::Mutex` 与 [`RawSpinLock`] 的组合，提供带数据的关中断自旋锁。
//!
//! # 示例
//! ```ignore
//! let lock = SpinLock::new(0);
//! {
//!     let mut guard = lock.lock(); // 关中断并获取锁
//!     *guard += 1;
//! } // 释放锁并恢复中断
//! ```

use crate::raw_spin_lock::RawSpinLock;

/// 关中断自旋锁保护的数据。
///
/// 持锁期间应避免长时间运行的操作，也不要在持锁时调用可能再次获取同一把锁的代码。
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;

/// [`SpinLock`] 的 RAII 保护器，离开作用域时释放锁并恢复中断状态。
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
