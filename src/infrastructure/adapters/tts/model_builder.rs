//! Model Builder - 启动时构建合成模型
//!
//! 权重文件缺失属于致命错误，服务不会在没有模型的情况下启动

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use super::{FakeSpeechModel, FakeSpeechModelConfig, HttpSpeechModel, HttpSpeechModelConfig};
use crate::application::ports::{SpeechModelError, SpeechModelPort};
use crate::config::{ModelConfig, TtsBackend, TtsConfig};

/// 模型构建错误
#[derive(Debug, Error)]
pub enum ModelBuildError {
    #[error("Model weights not found: {0}")]
    WeightsNotFound(PathBuf),

    #[error("Failed to create speech model client: {0}")]
    Client(#[from] SpeechModelError),
}

/// 根据配置构建合成模型
pub fn build_speech_model(
    model: &ModelConfig,
    tts: &TtsConfig,
) -> Result<Arc<dyn SpeechModelPort>, ModelBuildError> {
    if !model.weights_path.is_file() {
        return Err(ModelBuildError::WeightsNotFound(model.weights_path.clone()));
    }

    let weights = model.weights_path.display().to_string();

    let speech_model: Arc<dyn SpeechModelPort> = match tts.backend {
        TtsBackend::Http => {
            let config = HttpSpeechModelConfig {
                base_url: tts.url.clone(),
                timeout_secs: tts.timeout_secs,
                max_retries: tts.max_retries,
                model: weights.clone(),
                device: model.device.to_string(),
            };
            Arc::new(HttpSpeechModel::new(config)?)
        }
        TtsBackend::Fake => Arc::new(FakeSpeechModel::new(FakeSpeechModelConfig {
            sample_rate: tts.sample_rate,
            ..Default::default()
        })),
    };

    tracing::info!(
        backend = %tts.backend,
        weights = %weights,
        device = %model.device,
        "Speech model built"
    );

    Ok(speech_model)
}
