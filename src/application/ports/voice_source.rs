//! Voice Source Port - 音色向量来源抽象
//!
//! 启动时按音色标识加载嵌入向量，失败即终止启动

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{VoiceId, VoiceVector};

/// 音色加载错误
#[derive(Debug, Error)]
pub enum VoiceSourceError {
    #[error("Voice file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid voice data: {0}")]
    InvalidData(String),
}

/// Voice Source Port
#[async_trait]
pub trait VoiceSourcePort: Send + Sync {
    /// 加载单个音色的嵌入向量
    async fn load(&self, voice_id: &VoiceId) -> Result<VoiceVector, VoiceSourceError>;
}
