//! mailbox 配置常量

/// ChannelMask 能表示的中断线数量（位宽）
///
/// 线号 `>= MAX_CHANNEL_LINES` 的通道永远无效。
pub const MAX_CHANNEL_LINES: usize = u64::BITS as usize;
