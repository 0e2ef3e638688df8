//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/voice/list        GET   列出音色目录
//! - /api/mixer/toggle      POST  复选框切换 → 滑块状态
//! - /api/mixer/formula     POST  面板状态 → 展示公式
//! - /api/mixer/parse       POST  公式预览（解析结果与权重和）
//! - /api/tts/synthesize    POST  文本 + 公式 → WAV

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voice", voice_routes())
        .nest("/mixer", mixer_routes())
        .nest("/tts", tts_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new().route("/list", get(handlers::list_voices))
}

/// Mixer 路由
fn mixer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/toggle", post(handlers::toggle_voice))
        .route("/formula", post(handlers::generate_formula))
        .route("/parse", post(handlers::parse_formula))
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new().route("/synthesize", post(handlers::synthesize))
}
