//! 服务状态 API 处理器

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use axum::{extract::State, response::Json};

#[cfg(feature = "web")]
use crate::shell::ShellCacheState;
#[cfg(feature = "web")]
use crate::web::types::{AppState, ShellStatus, StatusResponse};

/// 服务状态处理器
#[cfg(feature = "web")]
pub async fn service_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let shell = state.shell.as_ref().map(|cache| ShellStatus {
        state: match cache.state() {
            ShellCacheState::Installing => "installing".to_string(),
            ShellCacheState::Active => "active".to_string(),
        },
        cache_version: cache.manifest().version.clone(),
        stats: cache.stats(),
    });

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        translation: state.service.get_stats().snapshot(),
        shell,
    })
}
