//! Web 模块的数据类型定义

#[cfg(feature = "web")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "web")]
use crate::dictionary::DictionaryService;
#[cfg(feature = "web")]
use crate::shell::{CacheStats, ShellCache};
#[cfg(feature = "web")]
use crate::translation::detect::DetectLanguage;
#[cfg(feature = "web")]
use crate::translation::service::{
    FallbackInfo, InputMode, StatsSnapshot, TranslationService,
};

/// 应用状态
#[cfg(feature = "web")]
pub struct AppState {
    pub service: TranslationService,
    pub detector: Box<dyn DetectLanguage>,
    pub dictionary: DictionaryService,
    pub dictionary_lang: String,
    pub shell: Option<ShellCache>,
}

/// 翻译请求
#[cfg(feature = "web")]
#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub mode: Option<InputMode>,
}

/// 翻译响应
#[cfg(feature = "web")]
#[derive(Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub provider: String,
    /// 语言校验失配触发回退时携带失配信息
    pub fallback: Option<FallbackInfo>,
}

/// 语言检测请求
#[cfg(feature = "web")]
#[derive(Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// 语言检测响应
#[cfg(feature = "web")]
#[derive(Serialize)]
pub struct DetectResponse {
    /// 检测失败或无法判断时为 `None`
    pub language: Option<String>,
}

/// 词典查询参数
#[cfg(feature = "web")]
#[derive(Deserialize)]
pub struct DictionaryQuery {
    pub lang: Option<String>,
}

/// 服务状态响应
#[cfg(feature = "web")]
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub translation: StatsSnapshot,
    pub shell: Option<ShellStatus>,
}

/// 壳缓存状态
#[cfg(feature = "web")]
#[derive(Serialize)]
pub struct ShellStatus {
    pub state: String,
    pub cache_version: String,
    pub stats: CacheStats,
}

// 非 web feature 的占位类型
#[cfg(not(feature = "web"))]
pub struct AppState;
