//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{ApiResponse, VoiceDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出音色目录（面板顺序）
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VoiceDto>>>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices)?;
    Ok(Json(ApiResponse::success(
        voices.into_iter().map(VoiceDto::from).collect(),
    )))
}
