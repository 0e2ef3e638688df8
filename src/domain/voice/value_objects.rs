//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色标识（如 `af_bella`、`am_adam`）
///
/// 不变量:
/// - 非空
/// - 不含空白、`+`、`*`（否则无法写进混音公式）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.is_empty() {
            return Err("音色标识不能为空");
        }
        if id.chars().any(|c| c.is_whitespace() || c == '+' || c == '*') {
            return Err("音色标识不能包含空白、'+' 或 '*'");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VoiceId {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoiceId> for String {
    fn from(id: VoiceId) -> Self {
        id.0
    }
}

impl std::borrow::Borrow<str> for VoiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色嵌入向量
///
/// 维度由外部模型决定，加载后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceVector(Vec<f32>);

impl VoiceVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for VoiceVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// 音色目录条目：标识 + 展示名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: VoiceId,
    pub label: String,
}

impl VoiceProfile {
    pub fn new(id: VoiceId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
