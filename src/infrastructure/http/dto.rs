//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{ParsedFormulaResponse, VoiceResponse};
use crate::domain::mixer::WeightedTerm;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceDto {
    pub id: String,
    pub label: String,
    pub dimension: usize,
}

impl From<VoiceResponse> for VoiceDto {
    fn from(v: VoiceResponse) -> Self {
        Self {
            id: v.id,
            label: v.label,
            dimension: v.dimension,
        }
    }
}

// ============================================================================
// Mixer DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleVoiceRequest {
    pub enabled: bool,
}

/// 面板上的一行：音色 + 复选框 + 滑块
#[derive(Debug, Deserialize)]
pub struct SelectionDto {
    pub voice_id: String,
    pub enabled: bool,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFormulaRequest {
    pub selections: Vec<SelectionDto>,
}

#[derive(Debug, Serialize)]
pub struct FormulaResponse {
    pub formula: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseFormulaRequest {
    pub formula: String,
}

#[derive(Debug, Serialize)]
pub struct ParsedFormulaDto {
    pub formula: String,
    pub terms: Vec<WeightedTerm>,
    pub weight_sum: f32,
}

impl From<ParsedFormulaResponse> for ParsedFormulaDto {
    fn from(p: ParsedFormulaResponse) -> Self {
        Self {
            formula: p.formula,
            terms: p.terms,
            weight_sum: p.weight_sum,
        }
    }
}

// ============================================================================
// Synthesis DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub formula: String,
}
