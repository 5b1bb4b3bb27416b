//! 全局中断入口
//!
//! 中断向量处理程序只拿到线号，通过这里找到已安装的 [`Mailbox`] 实例。

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use log::{info, warn};

use crate::{Channel, Mailbox, MailboxError};

static MAILBOX: AtomicPtr<Mailbox> = AtomicPtr::new(ptr::null_mut());

/// 安装全局 mailbox 实例，只能成功一次
pub fn install(mailbox: &'static Mailbox) -> Result<(), MailboxError> {
    let new = mailbox as *const Mailbox as *mut Mailbox;
    MAILBOX
        .compare_exchange(ptr::null_mut(), new, Ordering::AcqRel, Ordering::Acquire)
        .map_err(|_| MailboxError::AlreadyInstalled)?;
    info!("mailbox: installed with mask {:?}", mailbox.mask());
    Ok(())
}

/// 已安装的全局 mailbox 实例
pub fn installed() -> Option<&'static Mailbox> {
    let ptr = MAILBOX.load(Ordering::Acquire);
    // SAFETY: 非空指针只能由 install 从 &'static Mailbox 写入
    unsafe { ptr.as_ref() }
}

/// 中断向量调用的入口
///
/// 返回该中断是否被 mailbox 处理；尚未安装实例时返回 `false`。
pub fn mailbox_irq_entry(line: Channel) -> bool {
    match installed() {
        Some(mailbox) => mailbox.handle_irq(line),
        None => {
            warn!("mailbox: interrupt on line {} before install", line);
            false
        }
    }
}
