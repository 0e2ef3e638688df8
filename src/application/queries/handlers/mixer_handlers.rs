//! Mixer Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::ParseFormula;
use crate::domain::mixer::{parse_formula, WeightedTerm};
use crate::domain::voice::VoiceStore;

/// 公式预览响应
#[derive(Debug, Clone)]
pub struct ParsedFormulaResponse {
    /// 规范化形式
    pub formula: String,
    pub terms: Vec<WeightedTerm>,
    pub weight_sum: f32,
}

/// ParseFormula Handler
pub struct ParseFormulaHandler {
    voice_store: Arc<VoiceStore>,
}

impl ParseFormulaHandler {
    pub fn new(voice_store: Arc<VoiceStore>) -> Self {
        Self { voice_store }
    }

    pub fn handle(&self, query: ParseFormula) -> Result<ParsedFormulaResponse, ApplicationError> {
        let formula = parse_formula(&query.formula, &self.voice_store)?;
        Ok(ParsedFormulaResponse {
            formula: formula.to_string(),
            weight_sum: formula.weight_sum(),
            terms: formula.into_terms(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mixer::FormulaError;
    use crate::domain::voice::{VoiceId, VoiceProfile, VoiceVector};

    fn handler() -> ParseFormulaHandler {
        let store = VoiceStore::new(["af", "af_bella"].iter().map(|id| {
            (
                VoiceProfile::new(VoiceId::new(*id).unwrap(), *id),
                VoiceVector::new(vec![1.0, 1.0]),
            )
        }))
        .unwrap();
        ParseFormulaHandler::new(Arc::new(store))
    }

    #[test]
    fn test_parse_formula_preview() {
        let parsed = handler()
            .handle(ParseFormula {
                formula: "0.333 * af + 0.667 * af_bella".to_string(),
            })
            .unwrap();
        assert_eq!(parsed.terms.len(), 2);
        assert!((parsed.weight_sum - 1.0).abs() < 1e-6);
        assert_eq!(parsed.formula, "0.333 * af + 0.667 * af_bella");
    }

    #[test]
    fn test_parse_formula_preview_errors() {
        let result = handler().handle(ParseFormula {
            formula: "0.5 af".to_string(),
        });
        assert!(matches!(
            result,
            Err(ApplicationError::Formula(FormulaError::MalformedTerm { .. }))
        ));
    }
}
