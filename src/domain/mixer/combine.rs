//! Mixer Context - 向量组合

use super::{FormulaError, WeightedTerm};
use crate::domain::voice::{VoiceStore, VoiceVector};

/// 计算 `Σ weight_i * vector(voice_i)`
///
/// 按项顺序逐元素累加，结果可复现；不做任何归一化。
pub fn combine(terms: &[WeightedTerm], store: &VoiceStore) -> Result<VoiceVector, FormulaError> {
    let mut accumulator: Option<Vec<f32>> = None;

    for term in terms {
        let vector = store
            .get(term.voice_id.as_str())
            .ok_or_else(|| FormulaError::UnknownVoice(term.voice_id.to_string()))?;

        match accumulator.as_mut() {
            Some(acc) => {
                for (a, v) in acc.iter_mut().zip(vector.as_slice()) {
                    *a += term.weight * v;
                }
            }
            None => {
                accumulator = Some(vector.as_slice().iter().map(|v| term.weight * v).collect());
            }
        }
    }

    accumulator
        .map(VoiceVector::new)
        .ok_or(FormulaError::EmptyFormula)
}
