// Unit tests for the interrupt-safe primitives.
//
// Nothing registers ArchOps here, so `arch_ops()` falls back to the shared
// `MOCK_ARCH_OPS`. Its interrupt flag is global, hence every test takes `SERIAL`.

extern crate std;

use crate::{ArchOps, IntrGuard, RawSpinLock, SpinLock};
use lock_api::RawMutex;
use std::sync::Mutex;
use test_support::mock::arch::{MOCK_ARCH_OPS, MockArchOps};

impl ArchOps for MockArchOps {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        unsafe { MockArchOps::read_and_disable_interrupts(self) }
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        unsafe { MockArchOps::restore_interrupts(self, flags) }
    }

    fn interrupts_enabled(&self, flags: usize) -> bool {
        MockArchOps::interrupts_enabled(self, flags)
    }
}

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> std::sync::MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    MOCK_ARCH_OPS.reset();
    guard
}

#[test]
fn test_intr_guard_restores_previous_state() {
    let _s = serial();
    assert!(MOCK_ARCH_OPS.enabled());
    {
        let guard = IntrGuard::new();
        assert!(guard.was_enabled());
        assert!(!MOCK_ARCH_OPS.enabled());
    }
    assert!(MOCK_ARCH_OPS.enabled());
}

#[test]
fn test_nested_intr_guard_keeps_outer_mask() {
    let _s = serial();
    let outer = IntrGuard::new();
    {
        let inner = IntrGuard::new();
        assert!(!inner.was_enabled());
    }
    // Dropping the inner guard must not re-enable interrupts.
    assert!(!MOCK_ARCH_OPS.enabled());
    drop(outer);
    assert!(MOCK_ARCH_OPS.enabled());
}

#[test]
fn test_spin_lock_masks_interrupts_while_held() {
    let _s = serial();
    let lock = SpinLock::new(5usize);
    {
        let mut guard = lock.lock();
        *guard += 1;
        assert!(!MOCK_ARCH_OPS.enabled());
        assert!(lock.is_locked());
    }
    assert!(MOCK_ARCH_OPS.enabled());
    assert!(!lock.is_locked());
    assert_eq!(*lock.lock(), 6);
}

#[test]
fn test_try_lock_fails_when_held_and_restores_interrupts() {
    let _s = serial();
    let lock = SpinLock::new(());
    let held = lock.lock();
    assert!(lock.try_lock().is_none());
    // The failed attempt must leave the holder's mask in place.
    assert!(!MOCK_ARCH_OPS.enabled());
    drop(held);
    assert!(MOCK_ARCH_OPS.enabled());
    assert!(lock.try_lock().is_some());
}

#[test]
fn test_raw_lock_inside_disabled_section() {
    let _s = serial();
    let raw = RawSpinLock::new();
    let outer = IntrGuard::new();
    raw.lock();
    assert!(raw.is_locked());
    // SAFETY: locked just above by this thread
    unsafe { raw.unlock() };
    // Unlock restores the state saved at lock time, which was already masked.
    assert!(!MOCK_ARCH_OPS.enabled());
    drop(outer);
    assert!(MOCK_ARCH_OPS.enabled());
}
