//! Speech Model Port - 语音合成模型抽象
//!
//! 定义 TTS 模型的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::VoiceVector;

/// 合成模型错误
#[derive(Debug, Error)]
pub enum SpeechModelError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 混合后的音色向量
    pub voice: VoiceVector,
    /// 语言标签（如 `a` 表示美式英语）
    pub language: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// 单声道 PCM 波形（f32，[-1, 1]）
    pub waveform: Vec<f32>,
    /// 音素序列
    pub phonemes: Vec<String>,
}

/// Speech Model Port
///
/// 外部合成模型的抽象接口（模型本身由启动时构建）
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    /// 执行合成
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, SpeechModelError>;

    /// 检查模型是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
