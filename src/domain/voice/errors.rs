//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("音色库为空")]
    Empty,

    #[error("音色重复: {0}")]
    Duplicate(VoiceId),

    #[error("音色维度不一致: {id} 期望 {expected}，实际 {actual}")]
    DimensionMismatch {
        id: VoiceId,
        expected: usize,
        actual: usize,
    },

    #[error("无效的音色向量: {0}")]
    InvalidVector(String),
}
