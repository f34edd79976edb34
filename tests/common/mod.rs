// 集成测试公共模块
//
// 提供可注入编排器的模拟提供商与模拟检测器

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use trilang::translation::detect::DetectLanguage;
use trilang::translation::error::{TranslationError, TranslationResult};
use trilang::translation::providers::{Translate, TranslationRequest};
use trilang::translation::service::TranslationService;

/// 记录调用次数的模拟提供商
pub struct MockProvider {
    label: &'static str,
    output: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// 总是成功并返回固定译文的提供商
    pub fn succeeding(label: &'static str, output: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                label,
                output: Some(output.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }

    /// 总是失败的提供商
    pub fn failing(label: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                label,
                output: None,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Translate for MockProvider {
    fn label(&self) -> &'static str {
        self.label
    }

    async fn translate(&self, _request: &TranslationRequest) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Err(TranslationError::Provider {
                provider: self.label,
                status: 500,
                body: "mock failure".to_string(),
            }),
        }
    }
}

/// 记录调用次数的模拟语言检测器
pub struct MockDetector {
    result: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockDetector {
    pub fn detecting(lang: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                result: Some(lang.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }

    /// 检测不可用（总是返回 `None`）
    pub fn unavailable() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                result: None,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl DetectLanguage for MockDetector {
    async fn detect(&self, _text: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// 装配一个带模拟组件的编排器
pub fn service_with(
    primary: Option<MockProvider>,
    secondary: MockProvider,
    detector: Option<MockDetector>,
) -> TranslationService {
    TranslationService::new(
        primary.map(|p| Box::new(p) as Box<dyn Translate>),
        Box::new(secondary),
        detector.map(|d| Box::new(d) as Box<dyn DetectLanguage>),
    )
}
