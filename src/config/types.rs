//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7860
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    /// 外部 HTTP 推理服务
    #[default]
    Http,
    /// 本地假模型（开发/测试）
    Fake,
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsBackend::Http => write!(f, "http"),
            TtsBackend::Fake => write!(f, "fake"),
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 后端类型
    #[serde(default)]
    pub backend: TtsBackend,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 语言标签（`a` = 美式英语）
    #[serde(default = "default_language")]
    pub language: String,

    /// 输出采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_language() -> String {
    "a".to_string()
}

fn default_sample_rate() -> u32 {
    24000
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            backend: TtsBackend::default(),
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
            language: default_language(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// 计算设备
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// 有 CUDA 用 CUDA，否则 CPU（由推理端判断）
    #[default]
    Auto,
    Cpu,
    Cuda,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Auto => "auto",
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// 权重文件路径
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,

    /// 计算设备
    #[serde(default)]
    pub device: Device,
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("kokoro-v0_19.safetensors")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
            device: Device::default(),
        }
    }
}

/// 音色目录条目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceEntry {
    /// 音色标识
    pub id: String,
    /// 展示名称
    pub label: String,
}

impl VoiceEntry {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// 音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 音色文件目录
    #[serde(default = "default_voices_dir")]
    pub dir: PathBuf,

    /// 音色目录（面板顺序）
    #[serde(default = "default_catalog")]
    pub catalog: Vec<VoiceEntry>,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("voices")
}

fn default_catalog() -> Vec<VoiceEntry> {
    vec![
        VoiceEntry::new("af", "Default"),
        VoiceEntry::new("af_bella", "Bella"),
        VoiceEntry::new("af_sarah", "Sarah"),
        VoiceEntry::new("af_nicole", "Nicole"),
        VoiceEntry::new("af_sky", "Sky"),
        VoiceEntry::new("am_adam", "Adam"),
        VoiceEntry::new("am_michael", "Michael"),
        VoiceEntry::new("bf_emma", "Emma"),
        VoiceEntry::new("bf_isabella", "Isabella"),
        VoiceEntry::new("bm_george", "George"),
        VoiceEntry::new("bm_lewis", "Lewis"),
    ]
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            dir: default_voices_dir(),
            catalog: default_catalog(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
