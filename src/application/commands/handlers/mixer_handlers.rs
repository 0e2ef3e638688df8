//! Mixer Command Handlers

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::commands::{GenerateFormula, ToggleVoice};
use crate::application::error::ApplicationError;
use crate::domain::mixer::{generate_formula, toggle_slider, FormulaError, SliderState};
use crate::domain::voice::VoiceStore;

// ============================================================================
// GenerateFormula
// ============================================================================

/// GenerateFormula Handler
pub struct GenerateFormulaHandler {
    voice_store: Arc<VoiceStore>,
}

impl GenerateFormulaHandler {
    pub fn new(voice_store: Arc<VoiceStore>) -> Self {
        Self { voice_store }
    }

    pub fn handle(&self, command: GenerateFormula) -> Result<String, ApplicationError> {
        // 面板只展示音色库中的音色
        if let Some(unknown) = command
            .selections
            .iter()
            .find(|s| !self.voice_store.contains(s.voice_id.as_str()))
        {
            return Err(FormulaError::UnknownVoice(unknown.voice_id.to_string()).into());
        }

        if let Some(invalid) = command.selections.iter().find(|s| !s.weight.is_finite()) {
            return Err(ApplicationError::validation(format!(
                "Weight of {} must be finite",
                invalid.voice_id
            )));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = command
            .selections
            .iter()
            .find(|s| !seen.insert(s.voice_id.as_str()))
        {
            return Err(ApplicationError::validation(format!(
                "Voice {} appears more than once",
                duplicate.voice_id
            )));
        }

        // 公式项按目录顺序排列，与面板一致
        let mut selections = command.selections;
        selections.sort_by_key(|s| self.voice_store.position(s.voice_id.as_str()));

        let formula = generate_formula(&selections);

        tracing::debug!(
            enabled = selections.iter().filter(|s| s.enabled).count(),
            formula = %formula,
            "Voice formula generated"
        );

        Ok(formula)
    }
}

// ============================================================================
// ToggleVoice
// ============================================================================

/// ToggleVoice Handler
#[derive(Default)]
pub struct ToggleVoiceHandler;

impl ToggleVoiceHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, command: ToggleVoice) -> SliderState {
        toggle_slider(command.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mixer::VoiceSelection;
    use crate::domain::voice::{VoiceId, VoiceProfile, VoiceVector};

    fn handler() -> GenerateFormulaHandler {
        let store = VoiceStore::new(["af", "am_adam"].iter().map(|id| {
            (
                VoiceProfile::new(VoiceId::new(*id).unwrap(), *id),
                VoiceVector::new(vec![0.5; 4]),
            )
        }))
        .unwrap();
        GenerateFormulaHandler::new(Arc::new(store))
    }

    fn selection(id: &str, enabled: bool, weight: f64) -> VoiceSelection {
        VoiceSelection::new(VoiceId::new(id).unwrap(), enabled, weight)
    }

    #[test]
    fn test_generate_formula() {
        let formula = handler()
            .handle(GenerateFormula {
                selections: vec![selection("af", true, 1.0), selection("am_adam", true, 3.0)],
            })
            .unwrap();
        assert_eq!(formula, "0.250 * af + 0.750 * am_adam");
    }

    #[test]
    fn test_generate_formula_rejects_unknown_voice() {
        let result = handler().handle(GenerateFormula {
            selections: vec![selection("bf_emma", true, 1.0)],
        });
        assert!(matches!(
            result,
            Err(ApplicationError::Formula(FormulaError::UnknownVoice(_)))
        ));
    }

    #[test]
    fn test_generate_formula_rejects_non_finite_weight() {
        let result = handler().handle(GenerateFormula {
            selections: vec![selection("af", true, f64::NAN)],
        });
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[test]
    fn test_generate_formula_follows_catalog_order() {
        let formula = handler()
            .handle(GenerateFormula {
                selections: vec![selection("am_adam", true, 3.0), selection("af", true, 1.0)],
            })
            .unwrap();
        assert_eq!(formula, "0.250 * af + 0.750 * am_adam");
    }

    #[test]
    fn test_generate_formula_rejects_duplicate_voice() {
        let result = handler().handle(GenerateFormula {
            selections: vec![selection("af", true, 1.0), selection("af", true, 1.0)],
        });
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[test]
    fn test_toggle_voice() {
        let state = ToggleVoiceHandler::new().handle(ToggleVoice { enabled: true });
        assert!(state.interactive);
        assert_eq!(state.weight, 1.0);
    }
}
