//! 测试支持 crate
//!
//! 提供 mailbox 子系统在宿主机 `cargo test` 下使用的 Mock 实现

#![no_std]

pub mod mock;
