//! Google 翻译提供商适配器
//!
//! 调用 Google Translate v2 REST 接口，译文位于
//! `data.translations[0].translatedText`。

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Translate, TranslationRequest};
use crate::core::{truncate_body, MAX_LOGGED_BODY_BYTES};
use crate::translation::error::{TranslationError, TranslationResult};

pub struct GoogleTranslator {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, api_base: &str, api_key: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Translate for GoogleTranslator {
    fn label(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResult<String> {
        let url = format!("{}?key={}", self.api_base, self.api_key);
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
            .get("data")
            .and_then(|v| v.get("translations"))
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("translatedText"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| TranslationError::Provider {
                provider: self.label(),
                status: status.as_u16(),
                body: format!(
                    "响应缺少译文字段: {}",
                    truncate_body(&text, MAX_LOGGED_BODY_BYTES)
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_field_path_matches_v2_shape() {
        let value: Value = serde_json::from_str(
            r#"{"data":{"translations":[{"translatedText":"hello"}]}}"#,
        )
        .unwrap();
        let text = value
            .get("data")
            .and_then(|v| v.get("translations"))
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("translatedText"))
            .and_then(|v| v.as_str());
        assert_eq!(text, Some("hello"));
    }
}
