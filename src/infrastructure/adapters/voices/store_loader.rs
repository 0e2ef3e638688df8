//! Voice Store Loader - 启动时构建音色库

use thiserror::Error;

use crate::application::ports::{VoiceSourceError, VoiceSourcePort};
use crate::domain::voice::{VoiceError, VoiceId, VoiceProfile, VoiceStore};

/// 音色库加载错误（启动期致命错误）
#[derive(Debug, Error)]
pub enum VoiceStoreLoadError {
    #[error("Failed to load voice {voice_id}: {source}")]
    Source {
        voice_id: VoiceId,
        #[source]
        source: VoiceSourceError,
    },

    #[error("Invalid voice store: {0}")]
    Store(#[from] VoiceError),
}

/// 按目录顺序加载全部音色
pub async fn load_voice_store(
    source: &dyn VoiceSourcePort,
    catalog: &[VoiceProfile],
) -> Result<VoiceStore, VoiceStoreLoadError> {
    let mut entries = Vec::with_capacity(catalog.len());

    for profile in catalog {
        let vector = source
            .load(&profile.id)
            .await
            .map_err(|err| VoiceStoreLoadError::Source {
                voice_id: profile.id.clone(),
                source: err,
            })?;
        entries.push((profile.clone(), vector));
    }

    let store = VoiceStore::new(entries)?;

    tracing::info!(
        voices = store.len(),
        dimension = store.dimension(),
        "Voice store loaded"
    );

    Ok(store)
}
