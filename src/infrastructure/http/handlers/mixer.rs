//! Mixer HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GenerateFormula, ParseFormula, ToggleVoice};
use crate::domain::mixer::{SliderState, VoiceSelection};
use crate::domain::voice::VoiceId;
use crate::infrastructure::http::dto::{
    ApiResponse, FormulaResponse, GenerateFormulaRequest, ParseFormulaRequest, ParsedFormulaDto,
    ToggleVoiceRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 复选框切换 → 滑块状态
pub async fn toggle_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ToggleVoiceRequest>,
) -> Json<ApiResponse<SliderState>> {
    let slider = state
        .toggle_voice_handler
        .handle(ToggleVoice { enabled: req.enabled });
    Json(ApiResponse::success(slider))
}

/// 面板状态 → 展示公式
pub async fn generate_formula(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateFormulaRequest>,
) -> Result<Json<ApiResponse<FormulaResponse>>, ApiError> {
    let selections = req
        .selections
        .into_iter()
        .map(|s| {
            VoiceId::new(s.voice_id.as_str())
                .map(|id| VoiceSelection::new(id, s.enabled, s.weight))
                .map_err(|e| ApiError::BadRequest(format!("{}: `{}`", e, s.voice_id)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let formula = state
        .generate_formula_handler
        .handle(GenerateFormula { selections })?;

    Ok(Json(ApiResponse::success(FormulaResponse { formula })))
}

/// 公式预览
pub async fn parse_formula(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParseFormulaRequest>,
) -> Result<Json<ApiResponse<ParsedFormulaDto>>, ApiError> {
    let parsed = state
        .parse_formula_handler
        .handle(ParseFormula { formula: req.formula })?;
    Ok(Json(ApiResponse::success(parsed.into())))
}
