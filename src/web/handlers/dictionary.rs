//! 词典查询 API 处理器

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

#[cfg(feature = "web")]
use crate::dictionary::DictionaryError;
#[cfg(feature = "web")]
use crate::web::types::{AppState, DictionaryQuery};

/// 词典查询处理器
///
/// 三个数据源并发查询，任意失败的部分在词条中留空而不是整体失败。
#[cfg(feature = "web")]
pub async fn lookup_word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
    Query(query): Query<DictionaryQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let lang = query.lang.as_deref().unwrap_or(&state.dictionary_lang);

    match state.dictionary.lookup(&word, lang).await {
        Ok(entry) => Ok(Json(serde_json::json!(entry))),
        Err(e @ DictionaryError::InvalidWord(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )),
    }
}
