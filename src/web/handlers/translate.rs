//! 翻译相关 API 处理器

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use axum::{
    extract::{Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};

#[cfg(feature = "web")]
use crate::translation::error::{ErrorCategory, TranslationError};
#[cfg(feature = "web")]
use crate::web::types::{
    AppState, DetectRequest, DetectResponse, TranslateRequest, TranslateResponse,
};

/// 按错误类别映射 HTTP 状态码
#[cfg(feature = "web")]
fn status_for(error: &TranslationError) -> StatusCode {
    match error.category() {
        ErrorCategory::Input | ErrorCategory::Configuration => StatusCode::BAD_REQUEST,
        ErrorCategory::Service | ErrorCategory::Network => StatusCode::BAD_GATEWAY,
        ErrorCategory::Parsing | ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 翻译处理器
///
/// 验证错误返回 400，提供商/网络错误返回 502。
#[cfg(feature = "web")]
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<serde_json::Value>)> {
    let mode = request.mode.unwrap_or_default();

    match state
        .service
        .translate(
            &request.text,
            &request.source_lang,
            &request.target_lang,
            mode,
        )
        .await
    {
        Ok(outcome) => Ok(Json(TranslateResponse {
            translated_text: outcome.translated_text,
            provider: outcome.provider_label.to_string(),
            fallback: outcome.fallback,
        })),
        Err(e) => {
            tracing::warn!("翻译请求失败: {}", e);
            Err((
                status_for(&e),
                Json(serde_json::json!({ "error": e.to_string() })),
            ))
        }
    }
}

/// 语言检测处理器
///
/// 检测是建议性的：失败或无法判断时返回 `language: null` 而不是错误。
#[cfg(feature = "web")]
pub async fn detect_language(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<DetectRequest>,
) -> Json<DetectResponse> {
    let language = state.detector.detect(&request.text).await;
    Json(DetectResponse { language })
}
