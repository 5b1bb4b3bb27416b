// Unit tests for the mailbox dispatch core.
//
// Hardware is simulated with `MockIrqLines`; `sync` gets a no-op ArchOps so the
// dispatch-table locks work on the host (same pattern as the block driver tests).

extern crate alloc;
extern crate test_support;

use alloc::boxed::Box;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{CallbackError, Channel, ChannelMask, Mailbox};
use sync::ArchOps;
use test_support::mock::irq::MockIrqLines;

mod isr;

struct DummyArchOps;

impl ArchOps for DummyArchOps {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        0
    }

    unsafe fn restore_interrupts(&self, _flags: usize) {}

    fn interrupts_enabled(&self, _flags: usize) -> bool {
        false
    }
}

static DUMMY_ARCH_OPS: DummyArchOps = DummyArchOps;
// 0 = uninit, 1 = initializing, 2 = ready
static SYNC_INIT: AtomicUsize = AtomicUsize::new(0);

fn init_sync_arch_ops() {
    match SYNC_INIT.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            // Safety: tests use a single global dummy ArchOps.
            unsafe { sync::register_arch_ops(&DUMMY_ARCH_OPS) };
            SYNC_INIT.store(2, Ordering::Release);
        }
        Err(_) => {
            while SYNC_INIT.load(Ordering::Acquire) != 2 {
                core::hint::spin_loop();
            }
        }
    }
}

fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// A fresh mailbox over `bits` with its own mock controller.
fn new_mailbox(bits: u64) -> (&'static Mailbox, &'static MockIrqLines) {
    init_sync_arch_ops();
    let hw = leak(MockIrqLines::new());
    let mask = ChannelMask::new(bits).unwrap();
    (leak(Mailbox::new(mask, hw)), hw)
}

/// Raise `line` on the mock controller; the entry point only runs if the line is enabled.
fn fire(mbox: &Mailbox, hw: &MockIrqLines, line: Channel) -> bool {
    if hw.raise(line) {
        mbox.handle_irq(line)
    } else {
        false
    }
}

/// Callback context recording what the entry point passed in.
struct Recorder {
    hw: &'static MockIrqLines,
    calls: AtomicUsize,
    last_line: AtomicUsize,
    pending_at_call: AtomicBool,
    retrigger_once: AtomicBool,
    fail: AtomicBool,
}

impl Recorder {
    fn new(hw: &'static MockIrqLines) -> &'static Recorder {
        leak(Recorder {
            hw,
            calls: AtomicUsize::new(0),
            last_line: AtomicUsize::new(usize::MAX),
            pending_at_call: AtomicBool::new(false),
            retrigger_once: AtomicBool::new(false),
            fail: AtomicBool::new(false),
        })
    }

    fn ctx(&'static self) -> usize {
        self as *const Recorder as usize
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_line(&self) -> usize {
        self.last_line.load(Ordering::SeqCst)
    }
}

fn record(line: Channel, ctx: usize) -> Result<(), CallbackError> {
    // SAFETY: tests only register contexts produced by `Recorder::ctx`.
    let rec = unsafe { &*(ctx as *const Recorder) };
    rec.calls.fetch_add(1, Ordering::SeqCst);
    rec.last_line.store(line, Ordering::SeqCst);
    rec.pending_at_call
        .store(rec.hw.is_pending(line), Ordering::SeqCst);
    if rec.retrigger_once.swap(false, Ordering::SeqCst) {
        rec.hw.raise(line);
    }
    if rec.fail.load(Ordering::SeqCst) {
        return Err(CallbackError::new(-5));
    }
    Ok(())
}
