//! 线号表
//!
//! 初始化时按升序枚举 ChannelMask 的置位构建一次，之后只读。
//! 对任意有效线号 `id` 满足 `LineTable[mask.rank(id)] == id`。

use alloc::vec::Vec;

use crate::{Channel, ChannelMask};

/// 稠密下标到物理线号的映射
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    lines: Vec<Channel>,
}

impl LineTable {
    /// 由掩码构建，长度等于 `mask.count()`
    pub fn build(mask: ChannelMask) -> Self {
        LineTable {
            lines: mask.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 下标对应的物理线号，越界返回 `None`
    pub fn get(&self, idx: usize) -> Option<Channel> {
        self.lines.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.lines.iter().copied()
    }

    pub fn as_slice(&self) -> &[Channel] {
        &self.lines
    }
}
