//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateFormulaHandler, SynthesizeConfig, SynthesizeHandler, ToggleVoiceHandler,
    // Query handlers
    ListVoicesHandler, ParseFormulaHandler,
    // Ports
    SpeechModelPort,
};
use crate::domain::voice::VoiceStore;

/// 应用状态
///
/// 音色库在启动时加载，之后只读；合成模型在进程内共享
pub struct AppState {
    // ========== Shared ==========
    pub voice_store: Arc<VoiceStore>,
    pub speech_model: Arc<dyn SpeechModelPort>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,
    pub generate_formula_handler: GenerateFormulaHandler,
    pub toggle_voice_handler: ToggleVoiceHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub parse_formula_handler: ParseFormulaHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voice_store: Arc<VoiceStore>,
        speech_model: Arc<dyn SpeechModelPort>,
        synthesize_config: SynthesizeConfig,
    ) -> Self {
        Self {
            voice_store: voice_store.clone(),
            speech_model: speech_model.clone(),

            // Command handlers
            synthesize_handler: SynthesizeHandler::new(
                synthesize_config,
                voice_store.clone(),
                speech_model,
            ),
            generate_formula_handler: GenerateFormulaHandler::new(voice_store.clone()),
            toggle_voice_handler: ToggleVoiceHandler::new(),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(voice_store.clone()),
            parse_formula_handler: ParseFormulaHandler::new(voice_store),
        }
    }
}
