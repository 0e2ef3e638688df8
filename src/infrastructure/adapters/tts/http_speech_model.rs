//! HTTP Speech Model - 调用外部 TTS 推理服务
//!
//! 实现 SpeechModelPort trait，通过 HTTP 调用加载了权重的推理服务
//!
//! 外部 TTS API:
//! POST http://localhost:8000/api/tts/generate
//! Request: {"text": "...", "voice": [f32...], "lang": "a", "model": "...", "device": "auto"}
//! Response: {"audio": [f32...], "phonemes": ["...", ...] | "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    GenerateRequest, GenerateResponse, SpeechModelError, SpeechModelPort,
};

/// 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateHttpRequest<'a> {
    text: &'a str,
    /// 混合后的音色向量
    voice: &'a [f32],
    lang: &'a str,
    /// 权重文件标识
    model: &'a str,
    device: &'a str,
}

/// 推理响应体 (JSON)
#[derive(Debug, Deserialize)]
struct GenerateHttpResponse {
    audio: Vec<f32>,
    #[serde(default)]
    phonemes: Phonemes,
}

/// 音素既可以是列表，也可以是整串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Phonemes {
    List(Vec<String>),
    Text(String),
}

impl Default for Phonemes {
    fn default() -> Self {
        Phonemes::List(Vec::new())
    }
}

impl Phonemes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Phonemes::List(list) => list,
            Phonemes::Text(text) => text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// HTTP 合成模型配置
#[derive(Debug, Clone)]
pub struct HttpSpeechModelConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试次数（仅网络错误和超时）
    pub max_retries: u32,
    /// 权重文件标识
    pub model: String,
    /// 计算设备
    pub device: String,
}

impl Default for HttpSpeechModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            max_retries: 0,
            model: "kokoro-v0_19.safetensors".to_string(),
            device: "auto".to_string(),
        }
    }
}

impl HttpSpeechModelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// HTTP 合成模型
pub struct HttpSpeechModel {
    client: Client,
    config: HttpSpeechModelConfig,
}

impl HttpSpeechModel {
    /// 创建新的 HTTP 合成模型
    pub fn new(config: HttpSpeechModelConfig) -> Result<Self, SpeechModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechModelError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取推理 URL
    fn generate_url(&self) -> String {
        format!("{}/api/tts/generate", self.config.base_url.trim_end_matches('/'))
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    async fn generate_once(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, SpeechModelError> {
        let body = GenerateHttpRequest {
            text: &request.text,
            voice: request.voice.as_slice(),
            lang: &request.language,
            model: &self.config.model,
            device: &self.config.device,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechModelError::Timeout
                } else if e.is_connect() {
                    SpeechModelError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SpeechModelError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechModelError::ModelError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateHttpResponse = response
            .json()
            .await
            .map_err(|e| SpeechModelError::InvalidResponse(format!("Failed to decode body: {}", e)))?;

        Ok(GenerateResponse {
            waveform: payload.audio,
            phonemes: payload.phonemes.into_vec(),
        })
    }
}

#[async_trait]
impl SpeechModelPort for HttpSpeechModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, SpeechModelError> {
        tracing::debug!(
            url = %self.generate_url(),
            text_len = request.text.len(),
            voice_dim = request.voice.dimension(),
            lang = %request.language,
            "Sending TTS generate request"
        );

        let mut attempt = 0;
        loop {
            match self.generate_once(&request).await {
                Ok(response) => {
                    tracing::info!(
                        samples = response.waveform.len(),
                        phonemes = response.phonemes.len(),
                        attempt = attempt,
                        "TTS generation completed"
                    );
                    return Ok(response);
                }
                Err(e @ (SpeechModelError::NetworkError(_) | SpeechModelError::Timeout))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt = attempt, "Retrying TTS request");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
