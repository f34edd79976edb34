//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

use crate::core::TrilangError;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 输入验证错误（同语言互译、空输入等，未发出任何网络请求）
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 提供商返回非 2xx 或响应中缺少译文字段
    #[error("提供商 {provider} 请求失败 (HTTP {status}): {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// 网络传输错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::Provider { .. } => ErrorCategory::Service,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 错误是否在发出网络请求之前产生
    pub fn is_pre_network(&self) -> bool {
        matches!(
            self,
            TranslationError::ConfigError(_) | TranslationError::InvalidInput(_)
        )
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Service,
    Network,
    Parsing,
    Internal,
}

/// 从TrilangError转换
impl From<TrilangError> for TranslationError {
    fn from(error: TrilangError) -> Self {
        TranslationError::InternalError(error.to_string())
    }
}

/// 转换为TrilangError（库边界使用）
impl From<TranslationError> for TrilangError {
    fn from(error: TranslationError) -> Self {
        TrilangError::new(&error.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }

    /// 创建网络错误
    pub fn network_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::NetworkError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }
}
