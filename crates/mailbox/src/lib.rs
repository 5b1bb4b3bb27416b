//! 跨核 mailbox 接收端中断分发
//!
//! 此 crate 把芯片相关的、稀疏的 mailbox 中断线映射到紧凑的分发表，
//! 负责使能/关闭对应的物理中断线，并在中断到来时调用注册的回调。包括：
//!
//! - [`ChannelMask`] - 有效通道集合及下标解析
//! - [`LineTable`] - 稠密下标到物理线号的映射
//! - [`Mailbox`] - 分发表、register/unregister/set_enabled/trigger 接口和中断入口
//! - [`mailbox_irq_entry`] - 供中断向量调用的全局入口
//!
//! # 架构解耦
//!
//! 通过 trait 抽象与具体硬件解耦：
//! - [`IrqLineOps`]: 逐线的中断控制器原语，构造 [`Mailbox`] 时注入
//! - `sync::ArchOps`: 本地中断开关，由 `sync` crate 的 `register_arch_ops` 注册

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod isr;
pub mod line_table;
pub mod mailbox;
pub mod mask;
pub mod ops;
pub mod stats;

/// 通道标识，即物理中断线号
pub type Channel = usize;

pub use dispatch::{DispatchEntry, MailboxCallback};
pub use error::{CallbackError, ControllerError, MailboxError};
pub use isr::{install, installed, mailbox_irq_entry};
pub use line_table::LineTable;
pub use mailbox::Mailbox;
pub use mask::{ChannelIter, ChannelMask};
pub use ops::IrqLineOps;
pub use stats::{MailboxStats, MailboxStatsSnapshot};

#[cfg(test)]
mod tests;
