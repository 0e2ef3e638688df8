//! Voice Queries

/// 列出所有音色查询（目录顺序）
#[derive(Debug, Clone)]
pub struct ListVoices;
