//! Voicemix - 音色混合 TTS 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色向量与只读音色库
//! - Mixer Context: 混音公式解析、组合与展示公式生成
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechModel, VoiceSource）
//! - Commands: 合成、面板交互
//! - Queries: 音色目录、公式预览
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: 合成模型客户端、音色文件加载、WAV 编码
//!
//! 离线工具 (precision/):
//! - 权重文件半精度转换与摘要校验

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod precision;

pub use config::{load_config, AppConfig};
