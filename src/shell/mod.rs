//! 离线应用壳缓存模块
//!
//! 后台预缓存固定清单内的静态资源并在离线时提供服务：
//! - **manifest**: 资源清单与版本标识
//! - **cache**: redb 持久化缓存、安装/激活状态机、请求路由
//!
//! 已知 API 模式的请求（翻译端点、检测端点、词典路径）完全绕过缓存
//! 直连网络，保证翻译结果永远不会被陈旧地提供；其余请求对静态资源
//! 采用缓存优先策略。

pub mod cache;
pub mod manifest;

pub use cache::{is_api_request, CacheStats, FetchStrategy, ShellCache, ShellCacheState};
pub use manifest::ShellManifest;

use thiserror::Error;

/// 壳缓存错误
#[derive(Error, Debug)]
pub enum ShellCacheError {
    /// 持久化存储错误
    #[error("缓存存储错误: {0}")]
    Storage(String),

    /// 安装阶段单个资源获取失败（整个安装随之失败）
    #[error("资源 {asset} 安装失败: {reason}")]
    Install { asset: String, reason: String },

    /// 网络错误
    #[error("网络错误: {0}")]
    Network(String),
}

pub type ShellCacheResult<T> = Result<T, ShellCacheError>;
