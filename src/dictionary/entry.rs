//! 词典词条类型

use serde::Serialize;

/// 关联词关系类别
///
/// 通过对数据源的类型标签做大小写不敏感的子串匹配得到；
/// 无法识别的类型落入通用的 `Related` 桶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Synonym,
    Antonym,
    Derived,
    Hypernym,
    Hyponym,
    Holonym,
    Meronym,
    Related,
}

/// 一次查询构建的完整词条
///
/// 每次查询都重新构建，不在两次查询之间保留任何关系。
/// 所有列表字段均已去重并截断到展示上限。
#[derive(Debug, Clone, Default, Serialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub part_of_speech: Option<String>,
    pub definitions: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub derived_terms: Vec<String>,
    pub hypernyms: Vec<String>,
    pub hyponyms: Vec<String>,
    pub holonyms: Vec<String>,
    pub meronyms: Vec<String>,
    pub related: Vec<String>,
    pub etymology: Option<String>,
    pub rhymes: Vec<String>,
}

impl DictionaryEntry {
    /// 创建只含查询词的空词条，各部分由三路查询逐步填充
    pub fn empty(word: &str) -> Self {
        Self {
            word: word.to_string(),
            ..Default::default()
        }
    }

    /// 按关系类别取得对应桶的可变引用
    pub fn bucket_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Synonym => &mut self.synonyms,
            RelationKind::Antonym => &mut self.antonyms,
            RelationKind::Derived => &mut self.derived_terms,
            RelationKind::Hypernym => &mut self.hypernyms,
            RelationKind::Hyponym => &mut self.hyponyms,
            RelationKind::Holonym => &mut self.holonyms,
            RelationKind::Meronym => &mut self.meronyms,
            RelationKind::Related => &mut self.related,
        }
    }
}
