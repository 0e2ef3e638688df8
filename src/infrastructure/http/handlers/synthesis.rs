//! Synthesis HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::Synthesize;
use crate::infrastructure::adapters::encode_wav;
use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const HEADER_REQUEST_ID: &str = "x-mixer-request-id";
pub const HEADER_SAMPLE_RATE: &str = "x-mixer-sample-rate";
pub const HEADER_DURATION_MS: &str = "x-mixer-duration-ms";
pub const HEADER_PHONEME_COUNT: &str = "x-mixer-phoneme-count";

/// 文本 + 公式 → WAV 音频
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    let output = state
        .synthesize_handler
        .handle(Synthesize {
            text: req.text,
            formula: req.formula,
        })
        .await?;

    let wav = encode_wav(&output.waveform, output.sample_rate);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, wav.len())
        .header(HEADER_REQUEST_ID, output.request_id.as_str())
        .header(HEADER_SAMPLE_RATE, output.sample_rate)
        .header(HEADER_DURATION_MS, output.duration_ms())
        .header(HEADER_PHONEME_COUNT, output.phonemes.len())
        .body(Body::from(wav))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
