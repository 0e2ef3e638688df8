//! TTS Adapter - 合成模型实现与构建

mod fake_speech_model;
mod http_speech_model;
mod model_builder;

pub use fake_speech_model::{FakeSpeechModel, FakeSpeechModelConfig};
pub use http_speech_model::{HttpSpeechModel, HttpSpeechModelConfig};
pub use model_builder::{build_speech_model, ModelBuildError};
