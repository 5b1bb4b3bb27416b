//! Mock 实现模块
//!
//! - [`arch`] - CPU 本地中断开关
//! - [`irq`] - 中断控制器的逐线 enable/pending/ack/trigger 状态

pub mod arch;
pub mod irq;
