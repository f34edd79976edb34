//! Web 路由定义

#[cfg(feature = "web")]
use axum::{
    routing::{get, post},
    Router,
};

#[cfg(feature = "web")]
use crate::web::{handlers::*, types::AppState};
#[cfg(feature = "web")]
use std::sync::Arc;

/// 创建路由结构
#[cfg(feature = "web")]
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // 壳页面与静态资源
        .route("/", get(index))
        .route("/shell/*path", get(shell_asset))
        // 翻译 API
        .route("/api/translate", post(translate_text))
        .route("/api/detect", post(detect_language))
        // 词典查询
        .route("/api/dictionary/:word", get(lookup_word))
        // 服务状态
        .route("/api/status", get(service_status))
}

/// 非 web feature 的占位函数
#[cfg(not(feature = "web"))]
pub fn create_routes() -> () {
    ()
}
