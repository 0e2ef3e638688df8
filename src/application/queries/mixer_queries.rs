//! Mixer Queries

/// 解析并校验公式（不合成）
#[derive(Debug, Clone)]
pub struct ParseFormula {
    pub formula: String,
}
