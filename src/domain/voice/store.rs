//! Voice Context - Voice Store

use std::collections::HashMap;

use super::{VoiceError, VoiceId, VoiceProfile, VoiceVector};

/// 音色库
///
/// 不变量:
/// - 至少包含一个音色
/// - 所有向量维度相同
/// - 构建后只读，不增删条目
/// - 保持目录顺序（混音面板的稳定排序）
#[derive(Debug)]
pub struct VoiceStore {
    profiles: Vec<VoiceProfile>,
    vectors: HashMap<VoiceId, VoiceVector>,
    dimension: usize,
}

impl VoiceStore {
    /// 从（目录条目，向量）序列构建音色库
    pub fn new(
        entries: impl IntoIterator<Item = (VoiceProfile, VoiceVector)>,
    ) -> Result<Self, VoiceError> {
        let mut profiles = Vec::new();
        let mut vectors = HashMap::new();
        let mut dimension: Option<usize> = None;

        for (profile, vector) in entries {
            if vector.dimension() == 0 {
                return Err(VoiceError::InvalidVector(format!(
                    "{} 的向量为空",
                    profile.id
                )));
            }

            match dimension {
                None => dimension = Some(vector.dimension()),
                Some(expected) if expected != vector.dimension() => {
                    return Err(VoiceError::DimensionMismatch {
                        id: profile.id,
                        expected,
                        actual: vector.dimension(),
                    });
                }
                Some(_) => {}
            }

            if vectors.contains_key(&profile.id) {
                return Err(VoiceError::Duplicate(profile.id));
            }

            vectors.insert(profile.id.clone(), vector);
            profiles.push(profile);
        }

        let dimension = dimension.ok_or(VoiceError::Empty)?;

        Ok(Self {
            profiles,
            vectors,
            dimension,
        })
    }

    pub fn get(&self, id: &str) -> Option<&VoiceVector> {
        self.vectors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 音色在目录中的位置
    pub fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.id.as_str() == id)
    }

    /// 按目录顺序返回所有音色
    pub fn profiles(&self) -> &[VoiceProfile] {
        &self.profiles
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
