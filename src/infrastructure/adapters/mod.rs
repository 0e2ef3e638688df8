//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod tts;
pub mod voices;

pub use audio::*;
pub use tts::*;
pub use voices::*;
