//! Voicemix - 音色混合 TTS 服务
//!
//! 启动流程：配置 → 日志 → 音色库 → 合成模型 → HTTP 服务

use std::sync::Arc;

use voicemix::application::SynthesizeConfig;
use voicemix::config::{load_config, print_config, voice_catalog, LogConfig};
use voicemix::infrastructure::adapters::{build_speech_model, load_voice_store, FileVoiceSource};
use voicemix::infrastructure::http::{AppState, HttpServer};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},voicemix={},tower_http=debug",
        log.level, log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Voicemix - 音色混合 TTS 服务");
    print_config(&config);

    // 启动时加载全部音色，任何一个失败都无法启动
    let catalog = voice_catalog(&config.voices)?;
    let source = FileVoiceSource::new(&config.voices.dir);
    let voice_store = Arc::new(load_voice_store(&source, &catalog).await?);

    tracing::info!(
        voices = voice_store.len(),
        dimension = voice_store.dimension(),
        "Voice store loaded"
    );

    // 合成模型
    let speech_model = build_speech_model(&config.model, &config.tts)?;
    if !speech_model.health_check().await {
        tracing::warn!(url = %config.tts.url, "Speech model is not reachable yet");
    }

    let state = AppState::new(
        voice_store,
        speech_model,
        SynthesizeConfig {
            language: config.tts.language.clone(),
            sample_rate: config.tts.sample_rate,
        },
    );

    let server = HttpServer::new(config.server.clone(), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
