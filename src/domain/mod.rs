//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色库（只读）
//! - Mixer Context: 混音公式解析、组合与生成

pub mod mixer;
pub mod voice;
