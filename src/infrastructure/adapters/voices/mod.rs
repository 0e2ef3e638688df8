//! Voice Adapter - 音色文件加载与音色库构建

mod file_voice_source;
mod store_loader;

pub use file_voice_source::FileVoiceSource;
pub use store_loader::{load_voice_store, VoiceStoreLoadError};
