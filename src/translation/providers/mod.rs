//! 翻译提供商适配器
//!
//! 所有提供商实现统一的 [`Translate`] 契约：构造提供商特定的请求体、
//! 发送、解析提供商特定的译文字段。正是这种一致性让编排器可以
//! 互换地使用它们。适配器不重试、不设置额外超时。

pub mod google;
pub mod libre;

pub use google::GoogleTranslator;
pub use libre::LibreTranslator;

use async_trait::async_trait;

use crate::translation::error::TranslationResult;

/// 规范化后的单次翻译请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// 提供商适配器契约
#[async_trait]
pub trait Translate: Send + Sync {
    /// 提供商标签，随结果返回给调用方
    fn label(&self) -> &'static str;

    /// 翻译一个单词或短语，失败时返回带状态码和截断响应体的错误
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String>;
}
