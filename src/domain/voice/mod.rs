//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色标识与嵌入向量
//! - 只读音色库（启动时构建一次）

mod errors;
mod store;
mod value_objects;

pub use errors::VoiceError;
pub use store::VoiceStore;
pub use value_objects::{VoiceId, VoiceProfile, VoiceVector};
