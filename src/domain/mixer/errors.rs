//! Mixer Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("混音公式为空")]
    EmptyFormula,

    #[error("无效的公式项 `{term}`: {reason}")]
    MalformedTerm { term: String, reason: String },

    #[error("未知音色: {0}")]
    UnknownVoice(String),
}

impl FormulaError {
    pub fn malformed(term: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTerm {
            term: term.into(),
            reason: reason.into(),
        }
    }
}
