//! HTTP Handlers

mod mixer;
mod ping;
mod synthesis;
mod voice;

pub use mixer::*;
pub use ping::*;
pub use synthesis::*;
pub use voice::*;
