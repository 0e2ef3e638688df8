//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod speech_model;
mod voice_source;

pub use speech_model::{GenerateRequest, GenerateResponse, SpeechModelError, SpeechModelPort};
pub use voice_source::{VoiceSourceError, VoiceSourcePort};
