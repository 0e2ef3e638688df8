//! File Voice Source - 文件系统音色加载
//!
//! 实现 VoiceSourcePort trait
//!
//! 查找顺序:
//! 1. `<dir>/<id>.safetensors`：同名张量，或文件中唯一的张量（F32/F16/BF16/F64）
//! 2. `<dir>/<id>.bin`：小端 f32 原始数据
//!
//! 多维张量（如 `[511, 1, 256]`）按行优先展平

use async_trait::async_trait;
use safetensors::{Dtype, SafeTensors};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{VoiceSourceError, VoiceSourcePort};
use crate::domain::voice::{VoiceId, VoiceVector};
use crate::precision::tensor_to_f32;

/// 文件系统音色来源
pub struct FileVoiceSource {
    /// 音色文件目录
    base_dir: PathBuf,
}

impl FileVoiceSource {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn safetensors_path(&self, voice_id: &VoiceId) -> PathBuf {
        self.base_dir.join(format!("{}.safetensors", voice_id))
    }

    fn raw_path(&self, voice_id: &VoiceId) -> PathBuf {
        self.base_dir.join(format!("{}.bin", voice_id))
    }
}

#[async_trait]
impl VoiceSourcePort for FileVoiceSource {
    async fn load(&self, voice_id: &VoiceId) -> Result<VoiceVector, VoiceSourceError> {
        let safetensors_path = self.safetensors_path(voice_id);
        if fs::try_exists(&safetensors_path).await.unwrap_or(false) {
            let bytes = fs::read(&safetensors_path)
                .await
                .map_err(|e| VoiceSourceError::IoError(e.to_string()))?;
            let vector = decode_safetensors(voice_id, &bytes)?;
            tracing::debug!(
                voice_id = %voice_id,
                path = %safetensors_path.display(),
                dimension = vector.dimension(),
                "Voice loaded"
            );
            return Ok(vector);
        }

        let raw_path = self.raw_path(voice_id);
        if fs::try_exists(&raw_path).await.unwrap_or(false) {
            let bytes = fs::read(&raw_path)
                .await
                .map_err(|e| VoiceSourceError::IoError(e.to_string()))?;
            let vector = decode_raw_f32(&bytes)?;
            tracing::debug!(
                voice_id = %voice_id,
                path = %raw_path.display(),
                dimension = vector.dimension(),
                "Voice loaded"
            );
            return Ok(vector);
        }

        Err(VoiceSourceError::NotFound(format!(
            "{} (looked for {} and {})",
            voice_id,
            safetensors_path.display(),
            raw_path.display()
        )))
    }
}

fn decode_safetensors(voice_id: &VoiceId, bytes: &[u8]) -> Result<VoiceVector, VoiceSourceError> {
    let tensors =
        SafeTensors::deserialize(bytes).map_err(|e| VoiceSourceError::InvalidData(e.to_string()))?;

    let view = match tensors.tensor(voice_id.as_str()) {
        Ok(view) => view,
        Err(_) => {
            let names = tensors.names();
            if names.len() != 1 {
                return Err(VoiceSourceError::InvalidData(format!(
                    "expected a tensor named `{}` or exactly one tensor, found {}",
                    voice_id,
                    names.len()
                )));
            }
            tensors
                .tensor(names[0])
                .map_err(|e| VoiceSourceError::InvalidData(e.to_string()))?
        }
    };

    let values = tensor_to_f32(view.dtype(), view.data())
        .map_err(|e| VoiceSourceError::InvalidData(e.to_string()))?;
    Ok(VoiceVector::new(values))
}

fn decode_raw_f32(bytes: &[u8]) -> Result<VoiceVector, VoiceSourceError> {
    let values = tensor_to_f32(Dtype::F32, bytes)
        .map_err(|e| VoiceSourceError::InvalidData(e.to_string()))?;
    Ok(VoiceVector::new(values))
}
