//! LibreTranslate 兼容提供商适配器
//!
//! 请求体与 Google 适配器同构（`q`/`source`/`target`/`format`），
//! 但发往 `{endpoint}/translate`，译文位于顶层 `translatedText` 字段。
//! 兼容自建中继服务。

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Translate, TranslationRequest};
use crate::core::{truncate_body, MAX_LOGGED_BODY_BYTES};
use crate::translation::error::{TranslationError, TranslationResult};

pub struct LibreTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translate for LibreTranslator {
    fn label(&self) -> &'static str {
        "libre"
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String> {
        let url = format!("{}/translate", self.endpoint);
        let body = json!({
            "q": request.text,
            "source": request.source_lang,
            "target": request.target_lang,
            "format": "text",
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(TranslationError::Provider {
                provider: self.label(),
                status: status.as_u16(),
                body: truncate_body(&text, MAX_LOGGED_BODY_BYTES),
            });
        }

        let value: Value = serde_json::from_str(&text)?;
        value
            .get("translatedText")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| TranslationError::Provider {
                provider: self.label(),
                status: status.as_u16(),
                body: format!(
                    "响应缺少translatedText字段: {}",
                    truncate_body(&text, MAX_LOGGED_BODY_BYTES)
                ),
            })
    }
}
