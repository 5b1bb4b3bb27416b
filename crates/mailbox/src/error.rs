//! mailbox 错误类型
//!
//! 错误码可通过 `to_errno()` 转换为系统调用错误码。

use core::fmt;

use crate::Channel;

/// 中断控制器边界返回的错误
///
/// mailbox 不解释这些错误，只原样向调用者传播。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// 控制器不支持该操作 (-ENOTSUP)
    NotSupported,
    /// 控制器忙 (-EBUSY)
    Busy,
    /// 访问控制器寄存器失败 (-EIO)
    Io,
}

impl ControllerError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            ControllerError::Io => -5,
            ControllerError::Busy => -16,
            ControllerError::NotSupported => -95,
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::NotSupported => write!(f, "operation not supported by controller"),
            ControllerError::Busy => write!(f, "controller busy"),
            ControllerError::Io => write!(f, "controller I/O error"),
        }
    }
}

/// mailbox 操作错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// 该线号不在 ChannelMask 中 (-EINVAL)
    InvalidChannel(Channel),
    /// 中断控制器操作失败，原样传播
    Controller(ControllerError),
    /// 构造时 ChannelMask 为空 (-EINVAL)
    EmptyMask,
    /// 全局中断入口已安装过 mailbox 实例 (-EBUSY)
    AlreadyInstalled,
}

impl MailboxError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            MailboxError::InvalidChannel(_) | MailboxError::EmptyMask => -22,
            MailboxError::AlreadyInstalled => -16,
            MailboxError::Controller(e) => e.to_errno(),
        }
    }
}

impl From<ControllerError> for MailboxError {
    fn from(e: ControllerError) -> Self {
        MailboxError::Controller(e)
    }
}

impl fmt::Display for MailboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailboxError::InvalidChannel(line) => write!(f, "invalid mailbox channel {}", line),
            MailboxError::Controller(e) => write!(f, "interrupt controller: {}", e),
            MailboxError::EmptyMask => write!(f, "channel mask is empty"),
            MailboxError::AlreadyInstalled => write!(f, "mailbox already installed"),
        }
    }
}

/// 回调返回的错误
///
/// 只在中断入口处记录日志和计数，不会继续向外传播。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackError {
    /// 回调自定义的错误码
    pub code: isize,
}

impl CallbackError {
    /// 以错误码构造
    pub const fn new(code: isize) -> Self {
        Self { code }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "callback failed with code {}", self.code)
    }
}
