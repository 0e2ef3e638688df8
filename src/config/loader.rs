//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsBackend, VoicesConfig};
use crate::domain::voice::{VoiceId, VoiceProfile};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEMIX_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEMIX_SERVER__PORT=8080`
/// - `VOICEMIX_TTS__URL=http://tts-server:8000`
/// - `VOICEMIX_TTS__BACKEND=fake`
/// - `VOICEMIX_MODEL__DEVICE=cuda`
/// - `VOICEMIX_VOICES__DIR=/data/voices`
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载的配置
/// - `Err(ConfigError)` - 加载失败
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 7860)?
        .set_default("tts.backend", "http")?
        .set_default("tts.url", "http://localhost:8000")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.max_retries", 0)?
        .set_default("tts.language", "a")?
        .set_default("tts.sample_rate", 24000)?
        .set_default("model.weights_path", "kokoro-v0_19.safetensors")?
        .set_default("model.device", "auto")?
        .set_default("voices.dir", "voices")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOICEMIX_
    // 层级分隔符: __ (双下划线)
    // 例如: VOICEMIX_TTS__URL=http://tts-server:8000
    builder = builder.add_source(
        Environment::with_prefix("VOICEMIX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 把音色目录配置转换为领域对象（保持顺序，拒绝重复和非法标识）
pub fn voice_catalog(config: &VoicesConfig) -> Result<Vec<VoiceProfile>, ConfigError> {
    if config.catalog.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice catalog cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    config
        .catalog
        .iter()
        .map(|entry| {
            let id = VoiceId::new(entry.id.as_str()).map_err(|reason| {
                ConfigError::ValidationError(format!("Invalid voice id `{}`: {}", entry.id, reason))
            })?;
            if !seen.insert(id.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate voice id in catalog: {}",
                    id
                )));
            }
            Ok(VoiceProfile::new(id, entry.label.clone()))
        })
        .collect()
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证 TTS URL
    if config.tts.backend == TtsBackend::Http && config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if config.tts.sample_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Sample rate cannot be 0".to_string(),
        ));
    }

    if config.tts.language.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Language tag cannot be empty".to_string(),
        ));
    }

    // 验证音色目录
    voice_catalog(&config.voices)?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("TTS Backend: {}", config.tts.backend);
    if config.tts.backend == TtsBackend::Http {
        tracing::info!("TTS URL: {}", config.tts.url);
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    }
    tracing::info!("Language: {}", config.tts.language);
    tracing::info!("Sample Rate: {} Hz", config.tts.sample_rate);
    tracing::info!("Model Weights: {:?}", config.model.weights_path);
    tracing::info!("Device: {}", config.model.device);
    tracing::info!("Voices Directory: {:?}", config.voices.dir);
    tracing::info!("Voices: {}", config.voices.catalog.len());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::VoiceEntry;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7860);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_tts_url() {
        let mut config = AppConfig::default();
        config.tts.url = String::new();
        assert!(validate_config(&config).is_err());

        // fake 后端不需要 URL
        config.tts.backend = TtsBackend::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_sample_rate() {
        let mut config = AppConfig::default();
        config.tts.sample_rate = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_voice_catalog_rejects_duplicates() {
        let mut config = AppConfig::default();
        config.voices.catalog.push(VoiceEntry {
            id: "af".to_string(),
            label: "Again".to_string(),
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_voice_catalog_rejects_invalid_ids() {
        let voices = VoicesConfig {
            dir: "voices".into(),
            catalog: vec![VoiceEntry {
                id: "af bella".to_string(),
                label: "Bella".to_string(),
            }],
        };
        assert!(voice_catalog(&voices).is_err());
    }

    #[test]
    fn test_voice_catalog_preserves_order() {
        let profiles = voice_catalog(&VoicesConfig::default()).unwrap();
        assert_eq!(profiles.len(), 11);
        assert_eq!(profiles[0].id.as_str(), "af");
        assert_eq!(profiles[1].label, "Bella");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicemix.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[tts]
backend = "fake"
language = "b"

[model]
device = "cpu"

[[voices.catalog]]
id = "bf_emma"
label = "Emma"
"#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.tts.backend, TtsBackend::Fake);
        assert_eq!(config.tts.language, "b");
        assert_eq!(config.tts.sample_rate, 24000);
        assert_eq!(config.model.device, crate::config::Device::Cpu);
        assert_eq!(config.voices.catalog.len(), 1);
        assert_eq!(config.voices.dir, std::path::PathBuf::from("voices"));
    }
}
