//! Synthesis Commands - 语音合成命令

/// 合成命令：文本 + 混音公式
#[derive(Debug, Clone)]
pub struct Synthesize {
    pub text: String,
    pub formula: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// 请求 ID（用于日志和追踪）
    pub request_id: String,
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 单声道波形
    pub waveform: Vec<f32>,
    /// 音素序列
    pub phonemes: Vec<String>,
    /// 提交的公式（去掉首尾空白，保留原始精度）
    pub formula: String,
}

impl SynthesisOutput {
    /// 音频时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.waveform.len() as u64 * 1000 / self.sample_rate as u64
    }
}
