//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::SpeechModelError;
use crate::domain::mixer::FormulaError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 混音公式错误（空公式、无效项、未知音色）
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// 合成文本为空
    #[error("Please enter some text")]
    EmptyText,

    /// 外部合成模型失败，保留原始信息
    #[error("Failed to generate speech: {0}")]
    Synthesis(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SpeechModelError> for ApplicationError {
    fn from(err: SpeechModelError) -> Self {
        Self::Synthesis(err.to_string())
    }
}
