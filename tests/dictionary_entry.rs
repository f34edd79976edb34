//! 词典词条公共接口测试

use trilang::dictionary::{
    classify_relation, dedup_capped, extract_section, labels_for, DictionaryEntry,
    DictionaryService, RelationKind,
};
use trilang::translation::config::DictionaryConfig;

/// 不可达的来源地址，保证任何网络访问都失败
const DEAD_ORIGIN: &str = "http://127.0.0.1:1";

/// 三个数据源全部失败时整体查询仍然成功，各部分留空
#[tokio::test]
async fn lookup_tolerates_every_source_failing() {
    let config = DictionaryConfig {
        definition_endpoint: format!("{}/definition", DEAD_ORIGIN),
        related_endpoint: format!("{}/related", DEAD_ORIGIN),
        markup_endpoint: format!("{}/html", DEAD_ORIGIN),
        ..Default::default()
    };
    let service = DictionaryService::from_config(&config);

    let entry = service
        .lookup("word", "en")
        .await
        .expect("数据源失败不应使整体查询失败");

    assert_eq!(entry.word, "word");
    assert!(entry.definitions.is_empty());
    assert!(entry.part_of_speech.is_none());
    assert!(entry.synonyms.is_empty());
    assert!(entry.antonyms.is_empty());
    assert!(entry.related.is_empty());
    assert!(entry.etymology.is_none());
    assert!(entry.rhymes.is_empty());
}

/// 只有空查询词是错误
#[tokio::test]
async fn empty_word_is_the_only_lookup_error() {
    let service = DictionaryService::from_config(&DictionaryConfig::default());
    assert!(service.lookup("   ", "en").await.is_err());
}

/// 词条序列化后的字段形状稳定，供 Web API 消费
#[test]
fn entry_serializes_with_stable_field_names() {
    let mut entry = DictionaryEntry::empty("word");
    entry.part_of_speech = Some("Noun".to_string());
    entry.definitions.push("The smallest unit of language.".to_string());
    entry.synonyms.push("term".to_string());
    entry.etymology = Some("From Old English.".to_string());

    let value = serde_json::to_value(&entry).expect("序列化词条");
    assert_eq!(value["word"], "word");
    assert_eq!(value["part_of_speech"], "Noun");
    assert_eq!(value["definitions"][0], "The smallest unit of language.");
    assert_eq!(value["synonyms"][0], "term");
    assert_eq!(value["etymology"], "From Old English.");
    assert!(value["antonyms"].as_array().expect("数组字段").is_empty());
}

/// 关系桶访问器把每种关系类型映射到对应的列表
#[test]
fn bucket_accessor_routes_each_relation_kind() {
    let mut entry = DictionaryEntry::empty("big");
    entry.bucket_mut(RelationKind::Synonym).push("large".to_string());
    entry.bucket_mut(RelationKind::Hypernym).push("size".to_string());

    assert_eq!(entry.synonyms, vec!["large"]);
    assert_eq!(entry.hypernyms, vec!["size"]);
}

/// 抽取与分类的公共函数可以独立于服务使用
#[test]
fn extraction_helpers_work_standalone() {
    let markup = "<h3>Etymology</h3>\n<p>From Proto-Germanic.</p>\n<h3>Usage</h3>\n";
    let labels = labels_for("en");
    let section = extract_section(markup, labels.etymology, 1200, 30);
    assert_eq!(section.as_deref(), Some("From Proto-Germanic."));

    assert_eq!(classify_relation("Synonyms"), RelationKind::Synonym);
    assert_eq!(
        dedup_capped(vec!["a".to_string(), "A".to_string(), "b".to_string()], 10),
        vec!["a", "b"]
    );
}
