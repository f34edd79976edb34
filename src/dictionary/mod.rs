//! 词典查询模块
//!
//! 为单个单词获取释义、近反义词、派生词、词源和押韵词：
//! - **service**: 三路并发查询与响应重塑
//! - **sections**: 表驱动的标题匹配抽取和关联词分类
//! - **entry**: 展示用的结构化词条
//!
//! 三个数据源相互独立，任意子集失败只会让对应部分留空，
//! 不会导致整次查询失败。

pub mod entry;
pub mod sections;
pub mod service;

pub use entry::{DictionaryEntry, RelationKind};
pub use sections::{classify_relation, dedup_capped, extract_section, labels_for, strip_tags};
pub use service::DictionaryService;

use thiserror::Error;

/// 词典查询错误
///
/// 单个数据源失败不是错误（对应部分渲染为空）；只有无效输入会失败。
#[derive(Error, Debug, Clone)]
pub enum DictionaryError {
    #[error("查询词无效: {0}")]
    InvalidWord(String),
}

pub type DictionaryResult<T> = Result<T, DictionaryError>;
