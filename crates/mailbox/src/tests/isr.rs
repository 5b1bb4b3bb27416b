use super::*;
use crate::{MailboxError, install, installed, mailbox_irq_entry};

// The global hook is process-wide, so everything touching it lives in one test.
#[test]
fn test_global_entry_forwards_to_installed_mailbox() {
    let (mbox, hw) = new_mailbox(0x007f_0000);
    let rec = Recorder::new(hw);
    mbox.register(21, record, rec.ctx()).unwrap();
    mbox.set_enabled(21, true).unwrap();

    assert!(installed().is_none());
    assert!(hw.raise(21));
    assert!(!mailbox_irq_entry(21));
    assert_eq!(rec.calls(), 0);

    install(mbox).unwrap();
    assert!(core::ptr::eq(installed().unwrap(), mbox));
    assert!(mailbox_irq_entry(21));
    assert_eq!(rec.calls(), 1);
    assert!(!mailbox_irq_entry(3));

    let (other, _) = new_mailbox(0x1);
    assert_eq!(install(other), Err(MailboxError::AlreadyInstalled));
    assert!(core::ptr::eq(installed().unwrap(), mbox));
}
