//! # Trilang Library
//!
//! 一个小而完整的单词/短语翻译服务库：选择翻译提供商、发送请求、
//! 校验输出语言并在必要时回退，同时提供词典释义补充和离线壳缓存。
//!
//! ## 模块组织
//!
//! - `core` - 基础错误类型和通用工具
//! - `translation` - 翻译编排器、提供商适配器和语言检测
//! - `dictionary` - 词典释义/同义词/词源查询
//! - `shell` - 离线应用壳缓存（静态资源缓存优先，API 请求直连网络）
//! - `env` - 类型安全的环境变量系统
//! - `web` - Web 服务器功能（可选）

pub mod core;
pub mod dictionary;
pub mod env;
pub mod shell;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use self::core::*;
