//! 翻译编排器
//!
//! 这是翻译子系统的主要入口点：规范化输入、选择提供商、对主提供商的
//! 输出做建议性的语言校验，失配时回退到备用提供商一次。
//!
//! ## 设计理念
//!
//! 1. **依赖注入**: 提供商和检测器在构造时传入，避免隐式全局读取
//! 2. **无结果缓存**: 重复的相同请求总是发出独立的网络调用
//! 3. **单次回退**: 回退结果不再二次校验
//! 4. **错误处理**: 验证错误在任何网络请求之前返回

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::translation::config::TrilangConfig;
use crate::translation::detect::{DetectLanguage, LibreDetector};
use crate::translation::error::{helpers, TranslationResult};
use crate::translation::providers::{
    GoogleTranslator, LibreTranslator, Translate, TranslationRequest,
};

/// 输入模式：单词模式截断到第一个空白分隔的词元，短语模式保留全文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Word,
    Phrase,
}

/// 触发回退的校验失配信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackInfo {
    /// 检测到的主提供商输出语言
    pub detected_lang: String,
    /// 请求的目标语言
    pub expected_lang: String,
}

/// 一次翻译的最终结果，构造后不可变，从不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    pub translated_text: String,
    pub provider_label: &'static str,
    /// 仅当语言校验失配触发了回退时存在
    pub fallback: Option<FallbackInfo>,
}

/// 规范化输入文本
///
/// 先裁剪空白；单词模式再截断到第一个词元。空结果是验证错误。
pub fn normalize_input(text: &str, mode: InputMode) -> TranslationResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(helpers::validation_error("输入为空"));
    }

    let normalized = match mode {
        InputMode::Word => trimmed
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
        InputMode::Phrase => trimmed.to_string(),
    };

    if normalized.is_empty() {
        return Err(helpers::validation_error("规范化后输入为空"));
    }

    Ok(normalized)
}

/// 服务统计信息（原子计数器，线程安全）
#[derive(Debug, Default)]
pub struct ServiceStats {
    requests: AtomicU64,
    validation_rejections: AtomicU64,
    fallbacks: AtomicU64,
    provider_failures: AtomicU64,
}

/// 统计信息快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub validation_rejections: u64,
    pub fallbacks: u64,
    pub provider_failures: u64,
}

impl ServiceStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
        }
    }
}

/// 统一的翻译服务
///
/// 组合主/备提供商与可选的语言检测器。除网络调用外没有副作用，
/// 不修改任何本地状态（统计计数器除外）。
pub struct TranslationService {
    primary: Option<Box<dyn Translate>>,
    secondary: Box<dyn Translate>,
    detector: Option<Box<dyn DetectLanguage>>,
    stats: ServiceStats,
}

impl TranslationService {
    /// 使用显式注入的组件创建服务
    pub fn new(
        primary: Option<Box<dyn Translate>>,
        secondary: Box<dyn Translate>,
        detector: Option<Box<dyn DetectLanguage>>,
    ) -> Self {
        Self {
            primary,
            secondary,
            detector,
            stats: ServiceStats::default(),
        }
    }

    /// 根据配置装配服务
    ///
    /// 配置了主提供商凭证时装配 Google 适配器；校验开关打开时装配
    /// 指向备用端点的检测器。
    pub fn from_config(config: &TrilangConfig) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trilang/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| helpers::config_error(format!("创建HTTP客户端失败: {}", e)))?;

        let primary: Option<Box<dyn Translate>> = if config.has_primary_credential() {
            let key = config.google_api_key.as_deref().unwrap_or_default();
            Some(Box::new(GoogleTranslator::new(
                client.clone(),
                &config.google_api_base,
                key,
            )))
        } else {
            None
        };

        let secondary: Box<dyn Translate> =
            Box::new(LibreTranslator::new(client.clone(), &config.libre_endpoint));

        let detector: Option<Box<dyn DetectLanguage>> = if config.verify_enabled {
            Some(Box::new(LibreDetector::new(client, &config.libre_endpoint)))
        } else {
            None
        };

        Ok(Self::new(primary, secondary, detector))
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// 翻译一个单词或短语
    ///
    /// 算法（详见模块文档）：
    /// 1. 同语言互译和空输入在任何网络请求之前被拒绝
    /// 2. 有主提供商时先调用主提供商，对输出做建议性语言检测
    /// 3. 检测结果与目标语言不符时调用备用提供商一次，并记录失配原因
    /// 4. 检测不可用时按原样接受主提供商的结果
    /// 5. 无主提供商凭证时直接调用备用提供商
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        mode: InputMode,
    ) -> TranslationResult<TranslationOutcome> {
        self.stats.requests.fetch_add(1, Ordering::Relaxed);

        if source_lang == target_lang {
            self.stats
                .validation_rejections
                .fetch_add(1, Ordering::Relaxed);
            return Err(helpers::validation_error("源语言与目标语言相同"));
        }

        let normalized = match normalize_input(text, mode) {
            Ok(normalized) => normalized,
            Err(e) => {
                self.stats
                    .validation_rejections
                    .fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        let request = TranslationRequest {
            text: normalized,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        };

        let Some(primary) = self.primary.as_ref() else {
            tracing::debug!("未配置主提供商凭证，直接使用备用提供商");
            return self.call_provider(self.secondary.as_ref(), &request, None).await;
        };

        let translated = match primary.translate(&request).await {
            Ok(translated) => translated,
            Err(e) => {
                self.stats.provider_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("主提供商失败: {}", e);
                return Err(e);
            }
        };

        // 建议性校验：检测不可用时按原样接受主提供商结果
        let detected = match self.detector.as_ref() {
            Some(detector) => detector.detect(&translated).await,
            None => None,
        };

        match detected {
            Some(detected_lang) if detected_lang != request.target_lang => {
                tracing::info!(
                    "语言校验失配 (检测到 {}，期望 {})，回退到备用提供商",
                    detected_lang,
                    request.target_lang
                );
                self.stats.fallbacks.fetch_add(1, Ordering::Relaxed);
                let fallback = FallbackInfo {
                    detected_lang,
                    expected_lang: request.target_lang.clone(),
                };
                // 单次回退：回退结果不再二次校验
                self.call_provider(self.secondary.as_ref(), &request, Some(fallback))
                    .await
            }
            _ => Ok(TranslationOutcome {
                translated_text: translated,
                provider_label: primary.label(),
                fallback: None,
            }),
        }
    }

    async fn call_provider(
        &self,
        provider: &dyn Translate,
        request: &TranslationRequest,
        fallback: Option<FallbackInfo>,
    ) -> TranslationResult<TranslationOutcome> {
        match provider.translate(request).await {
            Ok(translated_text) => Ok(TranslationOutcome {
                translated_text,
                provider_label: provider.label(),
                fallback,
            }),
            Err(e) => {
                self.stats.provider_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("提供商 {} 失败: {}", provider.label(), e);
                Err(e)
            }
        }
    }
}
