//! Mixer Context - 公式解析
//!
//! 文法:
//! ```text
//! formula := term ("+" term)*
//! term    := weight "*" voiceId
//! ```
//! `+`、`*` 两侧及首尾空白无意义。

use serde::Serialize;

use super::{format_term, join_terms, FormulaError, TERM_SEPARATOR, WEIGHT_SEPARATOR};
use crate::domain::voice::{VoiceId, VoiceStore, VoiceVector};

/// 加权项：权重 × 音色
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTerm {
    pub weight: f32,
    pub voice_id: VoiceId,
}

impl WeightedTerm {
    pub fn new(weight: f32, voice_id: VoiceId) -> Self {
        Self { weight, voice_id }
    }
}

/// 混音公式
///
/// 不变量:
/// - 至少一项
/// - 项的顺序与书写顺序一致
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    terms: Vec<WeightedTerm>,
}

impl Formula {
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<WeightedTerm> {
        self.terms
    }

    /// 权重之和
    pub fn weight_sum(&self) -> f32 {
        self.terms.iter().map(|t| t.weight).sum()
    }

    /// 按公式组合出音色向量
    pub fn combine(&self, store: &VoiceStore) -> Result<VoiceVector, FormulaError> {
        super::combine(&self.terms, store)
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = join_terms(
            self.terms
                .iter()
                .map(|t| format_term(f64::from(t.weight), t.voice_id.as_str())),
        );
        write!(f, "{}", rendered)
    }
}

/// 解析混音公式
///
/// 按书写顺序逐项校验，第一项出错即返回:
/// - 空串或纯空白 → `EmptyFormula`
/// - 某项不是恰好一个 `*`，或权重不是有限数 → `MalformedTerm`
/// - 音色不在音色库中 → `UnknownVoice`
pub fn parse_formula(input: &str, store: &VoiceStore) -> Result<Formula, FormulaError> {
    if input.trim().is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    let terms = input
        .split(TERM_SEPARATOR)
        .map(|term| parse_term(term, store))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Formula { terms })
}

fn parse_term(raw: &str, store: &VoiceStore) -> Result<WeightedTerm, FormulaError> {
    let term = raw.trim();
    let mut parts = term.split(WEIGHT_SEPARATOR);

    let (weight, voice) = match (parts.next(), parts.next(), parts.next()) {
        (Some(weight), Some(voice), None) => (weight.trim(), voice.trim()),
        _ => {
            return Err(FormulaError::malformed(
                term,
                "expected `<weight> * <voice>`",
            ))
        }
    };

    let weight: f32 = weight.parse().map_err(|_| {
        FormulaError::malformed(term, format!("weight `{}` is not a number", weight))
    })?;
    if !weight.is_finite() {
        return Err(FormulaError::malformed(term, "weight must be finite"));
    }

    if voice.is_empty() {
        return Err(FormulaError::malformed(term, "missing voice identifier"));
    }
    if !store.contains(voice) {
        return Err(FormulaError::UnknownVoice(voice.to_string()));
    }

    let voice_id = VoiceId::new(voice).map_err(|reason| FormulaError::malformed(term, reason))?;

    Ok(WeightedTerm::new(weight, voice_id))
}
