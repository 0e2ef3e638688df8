//! Mixer Context - 音色混合上下文
//!
//! 职责:
//! - 混音公式解析（`0.333 * af + 0.667 * af_bella`）
//! - 按公式对音色向量做线性组合
//! - 由面板状态生成归一化的展示公式
//!
//! 解析与生成共用同一套文法，生成的公式一定能被解析。

mod combine;
mod errors;
mod formula;
mod selection;

pub use combine::combine;
pub use errors::FormulaError;
pub use formula::{parse_formula, Formula, WeightedTerm};
pub use selection::{generate_formula, toggle_slider, SliderState, VoiceSelection};

/// 项分隔符
pub(crate) const TERM_SEPARATOR: char = '+';
/// 权重与音色分隔符
pub(crate) const WEIGHT_SEPARATOR: char = '*';

/// 按公式文法格式化单个项（3 位小数）
pub(crate) fn format_term(weight: f64, voice_id: &str) -> String {
    format!("{:.3} {} {}", weight, WEIGHT_SEPARATOR, voice_id)
}

/// 按公式文法拼接多个项
pub(crate) fn join_terms(terms: impl IntoIterator<Item = String>) -> String {
    terms
        .into_iter()
        .collect::<Vec<_>>()
        .join(&format!(" {} ", TERM_SEPARATOR))
}
