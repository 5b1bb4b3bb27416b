//! 中断控制器操作 trait
//!
//! mailbox 通过此 trait 访问逐线的中断控制器原语，而不直接读写寄存器。
//! 内核在构造 [`Mailbox`](crate::Mailbox) 时注入具体实现，测试使用
//! `test_support::mock::irq::MockIrqLines`。

use crate::{Channel, ControllerError};

/// 按物理线号寻址的中断控制器原语
///
/// 所有方法都不得阻塞，可能在中断上下文中被调用。
pub trait IrqLineOps: Send + Sync {
    /// 使能指定中断线
    fn enable_line(&self, line: Channel) -> Result<(), ControllerError>;

    /// 关闭指定中断线
    fn disable_line(&self, line: Channel) -> Result<(), ControllerError>;

    /// 指定中断线当前是否使能
    fn is_enabled(&self, line: Channel) -> bool;

    /// 清除指定中断线的挂起状态
    fn ack_line(&self, line: Channel) -> Result<(), ControllerError>;

    /// 在指定中断线上向对端核心发出信号
    fn trigger_line(&self, _line: Channel) -> Result<(), ControllerError> {
        Err(ControllerError::NotSupported)
    }
}
