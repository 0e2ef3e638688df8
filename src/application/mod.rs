//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechModel、VoiceSource）
//! - commands: CQRS 命令及处理器（合成、混音面板）
//! - queries: CQRS 查询及处理器（音色目录、公式预览）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Synthesis commands
    SynthesisOutput,
    Synthesize,
    // Mixer commands
    GenerateFormula,
    ToggleVoice,
    // Handlers
    handlers::{
        GenerateFormulaHandler, SynthesizeConfig, SynthesizeHandler, ToggleVoiceHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Speech model
    GenerateRequest,
    GenerateResponse,
    SpeechModelError,
    SpeechModelPort,
    // Voice source
    VoiceSourceError,
    VoiceSourcePort,
};

pub use queries::{
    ListVoices,
    ParseFormula,
    // Handlers
    handlers::{ListVoicesHandler, ParseFormulaHandler, ParsedFormulaResponse, VoiceResponse},
};
