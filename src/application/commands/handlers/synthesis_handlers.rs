//! Synthesis Command Handlers

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::application::commands::{SynthesisOutput, Synthesize};
use crate::application::error::ApplicationError;
use crate::application::ports::{GenerateRequest, SpeechModelPort};
use crate::domain::mixer::parse_formula;
use crate::domain::voice::VoiceStore;

/// 合成参数
#[derive(Debug, Clone)]
pub struct SynthesizeConfig {
    /// 语言标签
    pub language: String,
    /// 输出采样率（Hz）
    pub sample_rate: u32,
}

impl Default for SynthesizeConfig {
    fn default() -> Self {
        Self {
            language: "a".to_string(),
            sample_rate: 24000,
        }
    }
}

/// Synthesize Handler
///
/// 解析 → 组合 → 合成，每个请求独立执行；
/// 解析和组合错误在调用模型之前返回
pub struct SynthesizeHandler {
    config: SynthesizeConfig,
    voice_store: Arc<VoiceStore>,
    speech_model: Arc<dyn SpeechModelPort>,
}

impl SynthesizeHandler {
    pub fn new(
        config: SynthesizeConfig,
        voice_store: Arc<VoiceStore>,
        speech_model: Arc<dyn SpeechModelPort>,
    ) -> Self {
        Self {
            config,
            voice_store,
            speech_model,
        }
    }

    pub async fn handle(&self, command: Synthesize) -> Result<SynthesisOutput, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::EmptyText);
        }

        let formula = parse_formula(&command.formula, &self.voice_store)?;
        let voice = formula.combine(&self.voice_store)?;
        let formula_text = command.formula.trim().to_string();

        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        tracing::info!(
            request_id = %request_id,
            formula = %formula_text,
            text_len = command.text.len(),
            "Synthesizing speech"
        );

        let response = self
            .speech_model
            .generate(GenerateRequest {
                text: command.text,
                voice,
                language: self.config.language.clone(),
            })
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Speech model failed");
                ApplicationError::from(e)
            })?;

        tracing::info!(
            request_id = %request_id,
            samples = response.waveform.len(),
            phonemes = response.phonemes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Speech synthesized"
        );

        Ok(SynthesisOutput {
            request_id,
            sample_rate: self.config.sample_rate,
            waveform: response.waveform,
            phonemes: response.phonemes,
            formula: formula_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GenerateResponse, SpeechModelError};
    use crate::domain::mixer::FormulaError;
    use crate::domain::voice::{VoiceId, VoiceProfile, VoiceVector};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 记录调用次数与最后一次请求的模型
    #[derive(Default)]
    struct RecordingModel {
        calls: AtomicUsize,
        last_request: Mutex<Option<GenerateRequest>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl SpeechModelPort for RecordingModel {
        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> Result<GenerateResponse, SpeechModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            if let Some(message) = &self.fail_with {
                return Err(SpeechModelError::ModelError(message.clone()));
            }
            Ok(GenerateResponse {
                waveform: vec![0.0; 48000],
                phonemes: vec!["h".to_string(), "ə".to_string()],
            })
        }
    }

    fn store() -> Arc<VoiceStore> {
        let entry = |id: &str, values: Vec<f32>| {
            (
                VoiceProfile::new(VoiceId::new(id).unwrap(), id),
                VoiceVector::new(values),
            )
        };
        Arc::new(
            VoiceStore::new(vec![
                entry("af", vec![1.0, 2.0]),
                entry("am_adam", vec![3.0, -1.0]),
            ])
            .unwrap(),
        )
    }

    fn handler(model: Arc<RecordingModel>) -> SynthesizeHandler {
        SynthesizeHandler::new(SynthesizeConfig::default(), store(), model)
    }

    #[tokio::test]
    async fn test_synthesize_passes_combined_voice() {
        let model = Arc::new(RecordingModel::default());
        let output = handler(model.clone())
            .handle(Synthesize {
                text: "Hello there".to_string(),
                formula: "0.25 * af + 0.75 * am_adam".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.sample_rate, 24000);
        assert_eq!(output.waveform.len(), 48000);
        assert_eq!(output.duration_ms(), 2000);
        assert_eq!(output.formula, "0.25 * af + 0.75 * am_adam");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        let request = model.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.language, "a");
        assert_eq!(request.text, "Hello there");
        assert_eq!(request.voice.as_slice(), &[2.5, -0.25]);
    }

    #[tokio::test]
    async fn test_output_keeps_submitted_formula() {
        let model = Arc::new(RecordingModel::default());
        let output = handler(model.clone())
            .handle(Synthesize {
                text: "Hi".to_string(),
                formula: " 0.3333 * af + 0.6667 * am_adam ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.formula, "0.3333 * af + 0.6667 * am_adam");

        let request = model.last_request.lock().unwrap().clone().unwrap();
        let expected = [
            0.3333_f32 * 1.0 + 0.6667 * 3.0,
            0.3333_f32 * 2.0 + 0.6667 * -1.0,
        ];
        for (actual, expected) in request.voice.as_slice().iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_model() {
        let model = Arc::new(RecordingModel::default());
        let result = handler(model.clone())
            .handle(Synthesize {
                text: "   ".to_string(),
                formula: "1.0 * af".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::EmptyText)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_formula_errors_fail_fast() {
        let model = Arc::new(RecordingModel::default());
        let handler = handler(model.clone());

        let empty = handler
            .handle(Synthesize {
                text: "Hi".to_string(),
                formula: String::new(),
            })
            .await;
        assert!(matches!(
            empty,
            Err(ApplicationError::Formula(FormulaError::EmptyFormula))
        ));

        let unknown = handler
            .handle(Synthesize {
                text: "Hi".to_string(),
                formula: "0.5 * unknown_voice".to_string(),
            })
            .await;
        assert!(matches!(
            unknown,
            Err(ApplicationError::Formula(FormulaError::UnknownVoice(_)))
        ));

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_failure_keeps_message() {
        let model = Arc::new(RecordingModel {
            fail_with: Some("CUDA out of memory".to_string()),
            ..Default::default()
        });
        let result = handler(model)
            .handle(Synthesize {
                text: "Hi".to_string(),
                formula: "1.0 * af".to_string(),
            })
            .await;

        match result {
            Err(ApplicationError::Synthesis(message)) => {
                assert!(message.contains("CUDA out of memory"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
