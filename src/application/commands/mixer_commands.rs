//! Mixer Commands - 混音面板命令

use crate::domain::mixer::VoiceSelection;

/// 由面板状态生成公式
#[derive(Debug, Clone)]
pub struct GenerateFormula {
    pub selections: Vec<VoiceSelection>,
}

/// 切换音色复选框
#[derive(Debug, Clone, Copy)]
pub struct ToggleVoice {
    pub enabled: bool,
}
