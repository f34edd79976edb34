//! 语言检测
//!
//! 检测只用于校验译文的输出语言，是建议性的：任何传输失败、解析失败
//! 或空结果都返回 `None` 而不是错误，编排器随即接受主提供商的结果。

use async_trait::async_trait;
use serde_json::{json, Value};

/// 语言检测契约
#[async_trait]
pub trait DetectLanguage: Send + Sync {
    /// 返回文本的最可能语言代码，不可用时返回 `None`
    async fn detect(&self, text: &str) -> Option<String>;
}

/// LibreTranslate 兼容的 `/detect` 端点检测器
pub struct LibreDetector {
    client: reqwest::Client,
    endpoint: String,
}

impl LibreDetector {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DetectLanguage for LibreDetector {
    async fn detect(&self, text: &str) -> Option<String> {
        let url = format!("{}/detect", self.endpoint);
        let body = json!({ "q": text });

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("语言检测请求失败，跳过校验: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("语言检测返回 HTTP {}，跳过校验", response.status());
            return None;
        }

        let value: Value = match response.json().await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("语言检测响应解析失败，跳过校验: {}", e);
                return None;
            }
        };

        pick_best_guess(&value)
    }
}

/// 从 `[{language, confidence}]` 列表中选出置信度最高的语言
///
/// 置信度相同取先列出的一项；列表为空或形状不符返回 `None`。
pub fn pick_best_guess(value: &Value) -> Option<String> {
    let guesses = value.as_array()?;

    let mut best: Option<(&str, f64)> = None;
    for guess in guesses {
        // 跳过缺少语言字段的条目，不放弃其余的候选
        let Some(language) = guess.get("language").and_then(|v| v.as_str()) else {
            continue;
        };
        let confidence = guess
            .get("confidence")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        match best {
            Some((_, best_confidence)) if confidence <= best_confidence => {}
            _ => best = Some((language, confidence)),
        }
    }

    best.map(|(language, _)| language.to_string())
}
