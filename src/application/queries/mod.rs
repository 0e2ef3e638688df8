//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音色目录与公式预览

mod mixer_queries;
mod voice_queries;

pub mod handlers;

pub use mixer_queries::*;
pub use voice_queries::*;
