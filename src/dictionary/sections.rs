//! 标题匹配抽取与关联词分类
//!
//! 页面标记的结构化抽取采用表驱动方式：每种语言一组已知的标题标签，
//! 对标题行做大小写不敏感的子串匹配，抽取内容受显式的字符/行数预算
//! 约束，避免无界抽取。

use crate::dictionary::entry::RelationKind;

/// 每种语言已知的节标题标签
#[derive(Debug, Clone, Copy)]
pub struct SectionLabels {
    pub etymology: &'static [&'static str],
    pub rhymes: &'static [&'static str],
}

const EN_LABELS: SectionLabels = SectionLabels {
    etymology: &["etymology"],
    rhymes: &["rhymes"],
};

const FR_LABELS: SectionLabels = SectionLabels {
    etymology: &["étymologie", "etymologie"],
    rhymes: &["rimes"],
};

const ES_LABELS: SectionLabels = SectionLabels {
    etymology: &["etimología", "etimologia"],
    rhymes: &["rimas"],
};

const DE_LABELS: SectionLabels = SectionLabels {
    etymology: &["herkunft", "etymologie"],
    rhymes: &["reime"],
};

/// 取得语言对应的标题标签表，未知语言退回英语
pub fn labels_for(lang: &str) -> SectionLabels {
    match lang {
        "fr" => FR_LABELS,
        "es" => ES_LABELS,
        "de" => DE_LABELS,
        _ => EN_LABELS,
    }
}

/// 判断一行是否是节标题（HTML h1-h6 或 wikitext 的 == 标记）
fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("==") {
        return true;
    }
    for level in 1..=6u8 {
        let open = format!("<h{}", level);
        if let Some(prefix) = trimmed.get(..open.len()) {
            if prefix.eq_ignore_ascii_case(&open) {
                return true;
            }
        }
    }
    false
}

/// 去除 HTML 标签，保留文本内容
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// 从页面标记中抽取一个节的文本
///
/// 找到标题文本包含任一标签（大小写不敏感）的标题行，收集其后的
/// 内容行，直到下一个标题或达到字符/行数预算为止。
pub fn extract_section(
    markup: &str,
    labels: &[&str],
    char_budget: usize,
    line_budget: usize,
) -> Option<String> {
    let mut lines = markup.lines();

    // 定位匹配的标题行
    loop {
        let line = lines.next()?;
        if !is_heading_line(line) {
            continue;
        }
        let heading_text = strip_tags(line).trim_matches('=').trim().to_lowercase();
        if labels.iter().any(|label| heading_text.contains(label)) {
            break;
        }
    }

    let mut section = String::new();
    let mut collected_lines = 0usize;

    for line in lines {
        if is_heading_line(line) {
            break;
        }
        let text = strip_tags(line);
        if text.is_empty() {
            continue;
        }

        if collected_lines >= line_budget || section.len() + text.len() + 1 > char_budget {
            break;
        }

        if !section.is_empty() {
            section.push('\n');
        }
        section.push_str(&text);
        collected_lines += 1;
    }

    if section.is_empty() {
        None
    } else {
        Some(section)
    }
}

/// 通过子串匹配把关联词类型标签归入关系桶
pub fn classify_relation(label: &str) -> RelationKind {
    let label = label.to_lowercase();

    if label.contains("synonym") {
        RelationKind::Synonym
    } else if label.contains("antonym") {
        RelationKind::Antonym
    } else if label.contains("derive") || label.contains("derivation") {
        RelationKind::Derived
    } else if label.contains("hypernym") {
        RelationKind::Hypernym
    } else if label.contains("hyponym") {
        RelationKind::Hyponym
    } else if label.contains("holonym") {
        RelationKind::Holonym
    } else if label.contains("meronym") {
        RelationKind::Meronym
    } else {
        RelationKind::Related
    }
}

/// 保序去重并截断到展示上限
pub fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
            if out.len() >= cap {
                break;
            }
        }
    }

    out
}
