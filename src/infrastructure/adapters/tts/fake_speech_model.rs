//! Fake Speech Model - 用于开发和测试的合成模型
//!
//! 不调用推理服务，根据文本长度和音色向量生成确定性的正弦波形

use async_trait::async_trait;

use crate::application::ports::{
    GenerateRequest, GenerateResponse, SpeechModelError, SpeechModelPort,
};

/// Fake Speech Model 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechModelConfig {
    /// 采样率
    pub sample_rate: u32,
    /// 每个字符对应的时长（毫秒）
    pub ms_per_char: u32,
    /// 正弦频率（Hz）
    pub frequency: f32,
    /// 模拟推理延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeSpeechModelConfig {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            ms_per_char: 60,
            frequency: 220.0,
            latency_ms: 0,
        }
    }
}

/// Fake Speech Model
pub struct FakeSpeechModel {
    config: FakeSpeechModelConfig,
}

impl FakeSpeechModel {
    pub fn new(config: FakeSpeechModelConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            ms_per_char = config.ms_per_char,
            "FakeSpeechModel initialized"
        );
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechModelConfig::default())
    }

    /// 振幅由音色向量均值的绝对值决定，限制在 [0.1, 0.9]
    fn amplitude(voice: &[f32]) -> f32 {
        if voice.is_empty() {
            return 0.5;
        }
        let mean = voice.iter().sum::<f32>() / voice.len() as f32;
        if mean.is_finite() {
            mean.abs().clamp(0.1, 0.9)
        } else {
            0.5
        }
    }
}

#[async_trait]
impl SpeechModelPort for FakeSpeechModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, SpeechModelError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_dim = request.voice.dimension(),
            lang = %request.language,
            "FakeSpeechModel: generating synthetic waveform"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        let chars = request.text.chars().count() as u64;
        let total_samples =
            chars * self.config.ms_per_char as u64 * self.config.sample_rate as u64 / 1000;

        let amplitude = Self::amplitude(request.voice.as_slice());
        let step = 2.0 * std::f32::consts::PI * self.config.frequency / self.config.sample_rate as f32;
        let waveform = (0..total_samples)
            .map(|i| amplitude * (step * i as f32).sin())
            .collect();

        let phonemes = request
            .text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_lowercase().to_string())
            .collect();

        Ok(GenerateResponse { waveform, phonemes })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
