//! Mixer Context - 面板状态与展示公式

use serde::{Deserialize, Serialize};

use super::{format_term, join_terms};
use crate::domain::voice::VoiceId;

/// 面板上单个音色的选择状态（复选框 + 滑块）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSelection {
    pub voice_id: VoiceId,
    pub enabled: bool,
    /// 滑块值，按 f64 参与归一化
    pub weight: f64,
}

impl VoiceSelection {
    pub fn new(voice_id: VoiceId, enabled: bool, weight: f64) -> Self {
        Self {
            voice_id,
            enabled,
            weight,
        }
    }
}

/// 滑块状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderState {
    pub interactive: bool,
    pub weight: f32,
}

/// 复选框切换后的滑块状态
///
/// 勾选：可拖动，权重重置为 1.0；取消：不可拖动，权重归零
pub fn toggle_slider(enabled: bool) -> SliderState {
    if enabled {
        SliderState {
            interactive: true,
            weight: 1.0,
        }
    } else {
        SliderState {
            interactive: false,
            weight: 0.0,
        }
    }
}

/// 生成展示用的混音公式
///
/// - 没有勾选任何音色 → 空串
/// - 只勾选一个 → 原始权重，不归一化
/// - 勾选多个 → `weight_i / Σ weight`；和恰好为 0 时返回空串
pub fn generate_formula(selections: &[VoiceSelection]) -> String {
    let active: Vec<&VoiceSelection> = selections.iter().filter(|s| s.enabled).collect();

    match active.as_slice() {
        [] => String::new(),
        [single] => format_term(single.weight, single.voice_id.as_str()),
        _ => {
            let total: f64 = active.iter().map(|s| s.weight).sum();
            if total == 0.0 {
                return String::new();
            }

            join_terms(
                active
                    .iter()
                    .map(|s| format_term(s.weight / total, s.voice_id.as_str())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mixer::parse_formula;
    use crate::domain::voice::{VoiceProfile, VoiceStore, VoiceVector};

    fn selection(id: &str, enabled: bool, weight: f64) -> VoiceSelection {
        VoiceSelection::new(VoiceId::new(id).unwrap(), enabled, weight)
    }

    #[test]
    fn test_nothing_enabled_yields_empty() {
        let selections = vec![selection("af", false, 0.8), selection("am_adam", false, 0.2)];
        assert_eq!(generate_formula(&selections), "");
        assert_eq!(generate_formula(&[]), "");
    }

    #[test]
    fn test_single_voice_keeps_raw_weight() {
        let selections = vec![
            selection("af", false, 0.0),
            selection("af_sky", true, 0.37),
            selection("am_adam", false, 0.9),
        ];
        assert_eq!(generate_formula(&selections), "0.370 * af_sky");
    }

    #[test]
    fn test_multiple_voices_are_normalized() {
        let selections = vec![
            selection("af", true, 1.0),
            selection("af_bella", false, 0.5),
            selection("am_adam", true, 3.0),
        ];
        assert_eq!(
            generate_formula(&selections),
            "0.250 * af + 0.750 * am_adam"
        );
    }

    #[test]
    fn test_normalization_rounds_like_slider_panel() {
        let selections = vec![selection("af", true, 0.07), selection("am_adam", true, 0.09)];
        assert_eq!(
            generate_formula(&selections),
            "0.438 * af + 0.562 * am_adam"
        );

        let selections = vec![selection("af", true, 0.03), selection("am_adam", true, 0.77)];
        assert!(generate_formula(&selections).starts_with("0.037 * af + "));
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let selections = vec![selection("af", true, 3e38), selection("am_adam", true, 3e38)];
        assert_eq!(
            generate_formula(&selections),
            "0.500 * af + 0.500 * am_adam"
        );
    }

    #[test]
    fn test_zero_sum_yields_empty() {
        let selections = vec![selection("af", true, 0.0), selection("am_adam", true, 0.0)];
        assert_eq!(generate_formula(&selections), "");
    }

    #[test]
    fn test_generated_formula_parses_back() {
        let ids = ["af", "af_bella", "bf_emma", "bm_lewis"];
        let store = VoiceStore::new(ids.iter().map(|id| {
            (
                VoiceProfile::new(VoiceId::new(*id).unwrap(), *id),
                VoiceVector::new(vec![1.0, 2.0]),
            )
        }))
        .unwrap();

        let weights = [0.2_f64, 0.0, 0.55, 0.93];
        let selections: Vec<VoiceSelection> = ids
            .iter()
            .zip(weights)
            .map(|(id, w)| selection(id, *id != "af_bella", w))
            .collect();
        let total: f64 = [0.2_f64, 0.55, 0.93].iter().sum();

        let formula = parse_formula(&generate_formula(&selections), &store).unwrap();
        let parsed: Vec<(&str, f32)> = formula
            .terms()
            .iter()
            .map(|t| (t.voice_id.as_str(), t.weight))
            .collect();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].0, "af");
        assert_eq!(parsed[1].0, "bf_emma");
        assert_eq!(parsed[2].0, "bm_lewis");
        for ((_, weight), raw) in parsed.iter().zip([0.2_f64, 0.55, 0.93]) {
            assert!((f64::from(*weight) - raw / total).abs() <= 1e-3);
        }
    }

    #[test]
    fn test_toggle_slider() {
        assert_eq!(
            toggle_slider(true),
            SliderState {
                interactive: true,
                weight: 1.0
            }
        );
        assert_eq!(
            toggle_slider(false),
            SliderState {
                interactive: false,
                weight: 0.0
            }
        );
    }
}
