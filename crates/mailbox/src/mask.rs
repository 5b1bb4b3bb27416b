//! 通道掩码与下标解析
//!
//! ChannelMask 的第 N 位置位，表示第 N 号物理中断线是一个有效的 mailbox 通道。
//! 位号就是物理线号，而不是软件分配的序号。
//!
//! 通道在分发表中的位置只由掩码决定：线号 `id` 的稠密下标等于掩码中
//! 低于 `id` 的置位数目（popcount）。不使用任何硬件声明的最小/最大线号做减法，
//! 因为有效线号范围与实际接有中断的线号集合在不同芯片上并不一致。

use core::fmt;

use crate::{Channel, MailboxError, config::MAX_CHANNEL_LINES};

/// 有效 mailbox 通道的集合（按物理线号的位图）
///
/// 硬件配置加载后不可变，且保证非空。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMask(u64);

impl ChannelMask {
    /// 由位图构造，空位图返回 [`MailboxError::EmptyMask`]
    pub const fn new(bits: u64) -> Result<Self, MailboxError> {
        if bits == 0 {
            return Err(MailboxError::EmptyMask);
        }
        Ok(ChannelMask(bits))
    }

    /// 由线号列表构造
    ///
    /// 线号超出位宽时返回 [`MailboxError::InvalidChannel`]，列表为空时返回
    /// [`MailboxError::EmptyMask`]。重复的线号会被合并。
    pub fn from_lines<I>(lines: I) -> Result<Self, MailboxError>
    where
        I: IntoIterator<Item = Channel>,
    {
        let mut bits = 0u64;
        for line in lines {
            if line >= MAX_CHANNEL_LINES {
                return Err(MailboxError::InvalidChannel(line));
            }
            bits |= 1u64 << line;
        }
        Self::new(bits)
    }

    /// 原始位图
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// 有效通道数目
    pub const fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// 该线号是否为有效通道
    #[inline]
    pub const fn contains(&self, line: Channel) -> bool {
        line < MAX_CHANNEL_LINES && self.0 & (1u64 << line) != 0
    }

    /// 下标解析：掩码中低于 `line` 的置位数目
    ///
    /// 纯算术映射，不检查 `line` 是否在掩码中；调用者必须先用
    /// [`ChannelMask::contains`] 校验，或直接使用 [`ChannelMask::index_of`]。
    #[inline]
    pub const fn rank(&self, line: Channel) -> usize {
        debug_assert!(line < MAX_CHANNEL_LINES);
        let below = (1u64 << line) - 1;
        (self.0 & below).count_ones() as usize
    }

    /// 校验后的下标解析，`line` 不在掩码中时返回 `None`
    #[inline]
    pub const fn index_of(&self, line: Channel) -> Option<usize> {
        if self.contains(line) {
            Some(self.rank(line))
        } else {
            None
        }
    }

    /// 按线号从低到高枚举有效通道
    pub fn iter(&self) -> ChannelIter {
        ChannelIter { rest: self.0 }
    }
}

impl fmt::Debug for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelMask({:#x})", self.0)
    }
}

impl IntoIterator for ChannelMask {
    type Item = Channel;
    type IntoIter = ChannelIter;

    fn into_iter(self) -> ChannelIter {
        self.iter()
    }
}

/// [`ChannelMask`] 置位的升序迭代器
#[derive(Debug, Clone)]
pub struct ChannelIter {
    rest: u64,
}

impl Iterator for ChannelIter {
    type Item = Channel;

    fn next(&mut self) -> Option<Channel> {
        if self.rest == 0 {
            return None;
        }
        let line = self.rest.trailing_zeros() as Channel;
        // 清除最低置位
        self.rest &= self.rest - 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChannelIter {}
