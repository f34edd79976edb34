//! 离线壳静态资源处理器

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

#[cfg(feature = "web")]
use crate::shell::ShellCacheError;
#[cfg(feature = "web")]
use crate::web::types::AppState;

/// 按文件扩展名推断 Content-Type
#[cfg(feature = "web")]
fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") | None => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") | Some("webmanifest") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some(_) => "application/octet-stream",
    }
}

/// 首页处理器
#[cfg(feature = "web")]
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    serve_from_shell(&state, "/").await
}

/// 壳静态资源处理器
#[cfg(feature = "web")]
pub async fn shell_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    let requested = format!("/{}", path.trim_start_matches('/'));
    serve_from_shell(&state, &requested).await
}

#[cfg(feature = "web")]
async fn serve_from_shell(state: &AppState, path: &str) -> Response {
    let Some(ref shell) = state.shell else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(serde_json::json!({ "error": "离线壳功能未启用" })),
        )
            .into_response();
    };

    match shell.handle(path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type_for(path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("壳资源 {} 获取失败: {}", path, e);
            let status = match e {
                ShellCacheError::Network(_) | ShellCacheError::Install { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                ShellCacheError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                axum::Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
