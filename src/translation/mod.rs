//! 翻译模块
//!
//! 提供完整的单词/短语翻译功能，采用清晰的模块化架构：
//! - **service**: 翻译编排器（提供商选择、语言校验、单次回退）
//! - **providers**: 提供商适配器（Google、LibreTranslate 兼容中继）
//! - **detect**: 建议性语言检测
//! - **config**: 配置管理和设置存储
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use trilang::translation::{translate_text, InputMode};
//! use trilang::translation::config::TrilangConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrilangConfig::default();
//! let outcome = translate_text("bonjour", "fr", "en", InputMode::Word, &config).await?;
//! println!("{} (via {})", outcome.translated_text, outcome.provider_label);
//! # Ok(())
//! # }
//! ```

/// 配置管理模块 - 处理提供商凭证、端点和子系统配置
pub mod config;

/// 语言检测模块 - 建议性的译文输出语言校验
pub mod detect;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 提供商适配器模块 - 统一契约下的各家翻译服务
pub mod providers;

/// 编排器模块 - 翻译子系统的主要入口点
pub mod service;

// ============================================================================
// 核心API导出
// ============================================================================

pub use config::{ConfigManager, TrilangConfig};
pub use detect::{DetectLanguage, LibreDetector};
pub use error::{ErrorCategory, TranslationError, TranslationResult};
pub use providers::{GoogleTranslator, LibreTranslator, Translate, TranslationRequest};
pub use service::{
    normalize_input, FallbackInfo, InputMode, ServiceStats, StatsSnapshot, TranslationOutcome,
    TranslationService,
};

/// 翻译一个单词或短语（便利函数）
///
/// 内部根据配置装配一次性的翻译服务。需要复用连接和统计信息时
/// 请直接构造 [`TranslationService`]。
pub async fn translate_text(
    text: &str,
    source_lang: &str,
    target_lang: &str,
    mode: InputMode,
    config: &TrilangConfig,
) -> TranslationResult<TranslationOutcome> {
    let service = TranslationService::from_config(config)?;
    service.translate(text, source_lang, target_lang, mode).await
}
