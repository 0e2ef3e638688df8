//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：合成与混音面板交互

mod mixer_commands;
mod synthesis_commands;

pub mod handlers;

pub use mixer_commands::*;
pub use synthesis_commands::*;
