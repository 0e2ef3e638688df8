//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::ListVoices;
use crate::domain::voice::VoiceStore;

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色信息响应
#[derive(Debug, Clone)]
pub struct VoiceResponse {
    pub id: String,
    pub label: String,
    pub dimension: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    voice_store: Arc<VoiceStore>,
}

impl ListVoicesHandler {
    pub fn new(voice_store: Arc<VoiceStore>) -> Self {
        Self { voice_store }
    }

    pub fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceResponse>, ApplicationError> {
        let dimension = self.voice_store.dimension();
        Ok(self
            .voice_store
            .profiles()
            .iter()
            .map(|p| VoiceResponse {
                id: p.id.to_string(),
                label: p.label.clone(),
                dimension,
            })
            .collect())
    }
}
