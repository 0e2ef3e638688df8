//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod mixer_handlers;
mod voice_handlers;

pub use mixer_handlers::*;
pub use voice_handlers::*;
