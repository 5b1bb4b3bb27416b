//! mailbox 接收端中断分发
//!
//! [`Mailbox`] 持有 ChannelMask、LineTable、分发表和注入的中断控制器操作。
//! 对外所有接口都以物理线号寻址，先校验线号在掩码中，再解析为稠密下标；
//! 不在掩码中的线号一律返回 [`MailboxError::InvalidChannel`]，不会计算下标。

use log::{debug, error, info, warn};

use crate::{
    Channel, ChannelMask, IrqLineOps, LineTable, MailboxCallback, MailboxError,
    dispatch::{DispatchEntry, DispatchTable},
    stats::{MailboxStats, MailboxStatsSnapshot},
};

/// mailbox 驱动实例
///
/// 所有接口都接收 `&self`：分发表条目各自由关中断自旋锁保护，
/// 因此同一实例可以同时被普通上下文和中断入口访问。
pub struct Mailbox {
    mask: ChannelMask,
    lines: LineTable,
    table: DispatchTable,
    ops: &'static dyn IrqLineOps,
    stats: MailboxStats,
}

impl Mailbox {
    /// 由硬件配置给出的掩码和中断控制器操作构造
    ///
    /// 分发表的所有条目初始为空，所有中断线的使能状态保持不变。
    pub fn new(mask: ChannelMask, ops: &'static dyn IrqLineOps) -> Self {
        let lines = LineTable::build(mask);
        let table = DispatchTable::new(lines.len());
        debug_assert_eq!(table.len(), mask.count());
        info!(
            "mailbox: {} channels, mask {:#x}, lines {:?}",
            lines.len(),
            mask.bits(),
            lines.as_slice()
        );
        Mailbox {
            mask,
            lines,
            table,
            ops,
            stats: MailboxStats::new(),
        }
    }

    /// 校验线号并解析为稠密下标
    fn index(&self, id: Channel) -> Result<usize, MailboxError> {
        self.mask.index_of(id).ok_or(MailboxError::InvalidChannel(id))
    }

    /// 在通道上注册回调，覆盖已有的注册
    ///
    /// 不改变中断线的使能状态。
    pub fn register(
        &self,
        id: Channel,
        callback: MailboxCallback,
        context: usize,
    ) -> Result<(), MailboxError> {
        let idx = self.index(id)?;
        let old = self
            .table
            .replace(idx, DispatchEntry::new(callback, context))
            .ok_or(MailboxError::InvalidChannel(id))?;
        if old.is_registered() {
            debug!("mailbox: channel {} callback replaced", id);
        } else {
            debug!("mailbox: channel {} callback registered", id);
        }
        Ok(())
    }

    /// 清除通道上的回调
    ///
    /// 若该线当前处于使能状态，先关闭它，避免中断分发到已清空的条目。
    /// 关闭失败时错误原样返回，条目保持不变。
    pub fn unregister(&self, id: Channel) -> Result<(), MailboxError> {
        let idx = self.index(id)?;
        if self.ops.is_enabled(id) {
            self.ops.disable_line(id)?;
            debug!("mailbox: channel {} disabled on unregister", id);
        }
        self.table
            .replace(idx, DispatchEntry::EMPTY)
            .ok_or(MailboxError::InvalidChannel(id))?;
        debug!("mailbox: channel {} callback cleared", id);
        Ok(())
    }

    /// 使能或关闭通道对应的物理中断线
    ///
    /// 使能一条没有回调的线是允许的，之后的中断只会被 ack 并计入 `unhandled`。
    pub fn set_enabled(&self, id: Channel, enabled: bool) -> Result<(), MailboxError> {
        self.index(id)?;
        if enabled {
            self.ops.enable_line(id)?;
        } else {
            self.ops.disable_line(id)?;
        }
        debug!(
            "mailbox: channel {} {}",
            id,
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// 在通道上向对端核心发出信号
    pub fn trigger(&self, id: Channel) -> Result<(), MailboxError> {
        self.index(id)?;
        self.ops.trigger_line(id)?;
        Ok(())
    }

    /// 通道对应的物理中断线当前是否使能
    pub fn is_enabled(&self, id: Channel) -> Result<bool, MailboxError> {
        self.index(id)?;
        Ok(self.ops.is_enabled(id))
    }

    /// 通道上是否注册了回调
    pub fn is_registered(&self, id: Channel) -> Result<bool, MailboxError> {
        let idx = self.index(id)?;
        self.table
            .get(idx)
            .map(|entry| entry.is_registered())
            .ok_or(MailboxError::InvalidChannel(id))
    }

    /// 中断入口：处理物理线 `line` 上的一次中断
    ///
    /// 1. 线号不在掩码中：计为伪中断并返回 `false`，不触碰控制器；
    /// 2. 先 ack 清除挂起位，回调执行期间的重新触发会作为新的一次中断到达；
    /// 3. 出锁后调用回调，回调错误只记录日志和计数；
    /// 4. 不会自动关闭该线。
    ///
    /// 返回该中断是否属于本 mailbox。
    pub fn handle_irq(&self, line: Channel) -> bool {
        let Some(idx) = self.mask.index_of(line) else {
            self.stats.inc_spurious();
            error!("mailbox: spurious interrupt on line {}", line);
            return false;
        };

        if let Err(e) = self.ops.ack_line(line) {
            // 中断确实发生了，仍然分发
            self.stats.inc_ack_failures();
            error!("mailbox: failed to ack line {}: {}", line, e);
        }

        let entry = self.table.get(idx).unwrap_or(DispatchEntry::EMPTY);
        match entry.callback {
            Some(callback) => {
                self.stats.inc_dispatched();
                if let Err(e) = callback(line, entry.context) {
                    self.stats.inc_callback_failures();
                    warn!("mailbox: channel {} callback: {}", line, e);
                }
            }
            None => {
                self.stats.inc_unhandled();
                warn!("mailbox: interrupt on channel {} without callback", line);
            }
        }
        true
    }

    /// 有效通道掩码
    pub fn mask(&self) -> ChannelMask {
        self.mask
    }

    /// 稠密下标到物理线号的映射
    pub fn line_table(&self) -> &LineTable {
        &self.lines
    }

    /// 按线号升序枚举有效通道
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.lines.iter()
    }

    /// 中断入口计数器快照
    pub fn stats(&self) -> MailboxStatsSnapshot {
        self.stats.snapshot()
    }
}
