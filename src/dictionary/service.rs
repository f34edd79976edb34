//! 词典查询服务
//!
//! 并发发出三路独立请求（释义、关联词、页面标记），容忍任意子集失败，
//! 把半结构化的响应重塑为展示用的 [`DictionaryEntry`]。

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::dictionary::entry::DictionaryEntry;
use crate::dictionary::sections::{
    classify_relation, dedup_capped, extract_section, labels_for, strip_tags,
};
use crate::dictionary::{DictionaryError, DictionaryResult};
use crate::translation::config::DictionaryConfig;

/// 词典查询服务
pub struct DictionaryService {
    client: reqwest::Client,
    config: DictionaryConfig,
}

impl DictionaryService {
    pub fn new(client: reqwest::Client, config: DictionaryConfig) -> Self {
        Self { client, config }
    }

    /// 使用配置与新建客户端创建服务
    pub fn from_config(config: &DictionaryConfig) -> Self {
        Self::new(reqwest::Client::new(), config.clone())
    }

    /// 查询一个单词的词典词条
    ///
    /// 查询词取裁剪后的第一个词元；三个数据源并发请求，
    /// 任意失败的部分渲染为空而不是整体失败。
    pub async fn lookup(&self, word: &str, lang: &str) -> DictionaryResult<DictionaryEntry> {
        let word = word
            .trim()
            .split_whitespace()
            .next()
            .ok_or_else(|| DictionaryError::InvalidWord("查询词为空".to_string()))?;

        let encoded = utf8_percent_encode(word, NON_ALPHANUMERIC).to_string();
        let definition_url = format!("{}/{}", self.config.definition_endpoint, encoded);
        let related_url = format!("{}/{}", self.config.related_endpoint, encoded);
        let markup_url = format!("{}/{}", self.config.markup_endpoint, encoded);

        let (definitions, related, markup) = tokio::join!(
            self.fetch_json(&definition_url),
            self.fetch_json(&related_url),
            self.fetch_text(&markup_url),
        );

        let mut entry = DictionaryEntry::empty(word);

        if let Some(value) = definitions {
            self.apply_definitions(&mut entry, &value, lang);
        }
        if let Some(value) = related {
            self.apply_related(&mut entry, &value);
        }
        if let Some(markup) = markup {
            self.apply_markup(&mut entry, &markup, lang);
        }

        Ok(entry)
    }

    /// 获取JSON响应；失败时返回 `None`，对应部分留空
    async fn fetch_json(&self, url: &str) -> Option<Value> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("词典请求失败 {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("词典请求 {} 返回 HTTP {}", url, response.status());
            return None;
        }

        match response.json().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("词典响应解析失败 {}: {}", url, e);
                None
            }
        }
    }

    /// 获取文本响应（页面标记）
    async fn fetch_text(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("词典标记请求失败 {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            return None;
        }

        response.text().await.ok()
    }

    /// 重塑释义响应：按语言键取条目，提取词性与释义文本
    fn apply_definitions(&self, entry: &mut DictionaryEntry, value: &Value, lang: &str) {
        // 响应按语言代码分组；请求语言缺失时退回任意一组
        let groups = match value.get(lang).and_then(|v| v.as_array()) {
            Some(groups) => Some(groups),
            None => value
                .as_object()
                .and_then(|map| map.values().next())
                .and_then(|v| v.as_array()),
        };

        let Some(groups) = groups else {
            return;
        };

        let mut definitions = Vec::new();
        for group in groups {
            if entry.part_of_speech.is_none() {
                entry.part_of_speech = group
                    .get("partOfSpeech")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
            }

            let Some(items) = group.get("definitions").and_then(|v| v.as_array()) else {
                continue;
            };
            for item in items {
                if let Some(text) = item.get("definition").and_then(|v| v.as_str()) {
                    let text = strip_tags(text);
                    if !text.is_empty() {
                        definitions.push(text);
                    }
                }
            }
        }

        entry.definitions = dedup_capped(definitions, self.config.max_list_items);
    }

    /// 重塑关联词响应：按类型标签分桶
    fn apply_related(&self, entry: &mut DictionaryEntry, value: &Value) {
        let Some(groups) = value.get("relatedWords").and_then(|v| v.as_array()) else {
            return;
        };

        for group in groups {
            let kind = group
                .get("relationshipType")
                .and_then(|v| v.as_str())
                .map(classify_relation)
                .unwrap_or(crate::dictionary::RelationKind::Related);

            let Some(words) = group.get("words").and_then(|v| v.as_array()) else {
                continue;
            };

            let bucket = entry.bucket_mut(kind);
            bucket.extend(
                words
                    .iter()
                    .filter_map(|w| w.as_str())
                    .map(|w| w.to_string()),
            );
        }

        let cap = self.config.max_list_items;
        for kind in [
            crate::dictionary::RelationKind::Synonym,
            crate::dictionary::RelationKind::Antonym,
            crate::dictionary::RelationKind::Derived,
            crate::dictionary::RelationKind::Hypernym,
            crate::dictionary::RelationKind::Hyponym,
            crate::dictionary::RelationKind::Holonym,
            crate::dictionary::RelationKind::Meronym,
            crate::dictionary::RelationKind::Related,
        ] {
            let bucket = entry.bucket_mut(kind);
            *bucket = dedup_capped(std::mem::take(bucket), cap);
        }
    }

    /// 从页面标记抽取词源和押韵词
    fn apply_markup(&self, entry: &mut DictionaryEntry, markup: &str, lang: &str) {
        let labels = labels_for(lang);
        let char_budget = self.config.section_char_budget;
        let line_budget = self.config.section_line_budget;

        entry.etymology = extract_section(markup, labels.etymology, char_budget, line_budget);

        if let Some(section) = extract_section(markup, labels.rhymes, char_budget, line_budget) {
            let rhymes: Vec<String> = section
                .split([',', '\n', ';'])
                .map(|s| s.trim().trim_end_matches('.').to_string())
                .filter(|s| !s.is_empty() && !s.contains(':'))
                .collect();
            entry.rhymes = dedup_capped(rhymes, self.config.max_list_items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> DictionaryService {
        DictionaryService::from_config(&DictionaryConfig::default())
    }

    #[test]
    fn definitions_are_reshaped_and_stripped() {
        let svc = service();
        let mut entry = DictionaryEntry::empty("word");
        let value = json!({
            "en": [
                {
                    "partOfSpeech": "Noun",
                    "definitions": [
                        {"definition": "The smallest <b>unit</b> of language."},
                        {"definition": "A promise."}
                    ]
                }
            ]
        });

        svc.apply_definitions(&mut entry, &value, "en");
        assert_eq!(entry.part_of_speech.as_deref(), Some("Noun"));
        assert_eq!(entry.definitions[0], "The smallest unit of language.");
        assert_eq!(entry.definitions.len(), 2);
    }

    #[test]
    fn missing_language_falls_back_to_first_group() {
        let svc = service();
        let mut entry = DictionaryEntry::empty("mot");
        let value = json!({
            "fr": [
                {"partOfSpeech": "Nom", "definitions": [{"definition": "Unité de langage."}]}
            ]
        });

        svc.apply_definitions(&mut entry, &value, "en");
        assert_eq!(entry.definitions, vec!["Unité de langage."]);
    }

    #[test]
    fn related_words_land_in_buckets() {
        let svc = service();
        let mut entry = DictionaryEntry::empty("big");
        let value = json!({
            "relatedWords": [
                {"relationshipType": "synonym", "words": ["large", "huge", "large"]},
                {"relationshipType": "antonym", "words": ["small"]},
                {"relationshipType": "etymologically-related-term", "words": ["bigly"]}
            ]
        });

        svc.apply_related(&mut entry, &value);
        assert_eq!(entry.synonyms, vec!["large", "huge"]);
        assert_eq!(entry.antonyms, vec!["small"]);
        assert_eq!(entry.related, vec!["bigly"], "未识别类型应落入通用桶");
    }

    #[test]
    fn markup_fills_etymology_and_rhymes() {
        let svc = service();
        let mut entry = DictionaryEntry::empty("cat");
        let markup = "<h3>Etymology</h3>\n<p>From Old English catt.</p>\n<h3>Rhymes</h3>\n<p>bat, hat, mat</p>\n";

        svc.apply_markup(&mut entry, markup, "en");
        assert_eq!(entry.etymology.as_deref(), Some("From Old English catt."));
        assert_eq!(entry.rhymes, vec!["bat", "hat", "mat"]);
    }
}
