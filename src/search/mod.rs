//! Keyword search over statute structure with highlighted HTML excerpts.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::StatuteRepository;
use crate::document::{DocumentNode, StatuteDocument};
use crate::error::{GaejeongError, Result};

pub const HIGHLIGHT_OPEN: &str = "<span style='color:red'>";
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Highlighted excerpt blocks of one statute, one block per matching article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatuteExcerpts {
    pub statute_name: String,
    pub excerpts: Vec<String>,
}

/// Whitespace-free form used for containment checks.
fn clean(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Escape the characters HTML treats specially in text and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inverse of [`escape_html`].
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Escape `text` for HTML and wrap every occurrence of `keyword` in a red span.
pub fn highlight(text: &str, keyword: &str) -> String {
    let escaped = escape_html(text);
    if keyword.is_empty() {
        return escaped;
    }
    let keyword = escape_html(keyword);
    escaped.replace(
        &keyword,
        &format!("{}{}{}", HIGHLIGHT_OPEN, keyword, HIGHLIGHT_CLOSE),
    )
}

/// Excerpt block for one article, if anything in it matches.
fn article_excerpt(article: &DocumentNode, query: &str, needle: &str) -> Option<String> {
    let matches = |text: &str| !text.is_empty() && clean(text).contains(needle);

    let article_matched = matches(&article.content);
    let mut blocks = Vec::new();
    if article_matched {
        blocks.push(highlight(&article.content, query));
    }

    let mut paragraph_emitted = false;
    for paragraph in &article.children {
        let mut nested = Vec::new();

        for item in &paragraph.children {
            if matches(&item.content) {
                nested.push(format!("&nbsp;&nbsp;{}", highlight(&item.content, query)));
            }

            for sub_item in &item.children {
                if !matches(&sub_item.content) {
                    continue;
                }
                let lines: Vec<String> = sub_item
                    .content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("&nbsp;&nbsp;&nbsp;&nbsp;{}", highlight(line, query)))
                    .collect();
                if !lines.is_empty() {
                    nested.push(format!(
                        "<div style='margin:0;padding:0'>{}</div>",
                        lines.join("<br>")
                    ));
                }
            }
        }

        if matches(&paragraph.content) || !nested.is_empty() {
            // The article text leads the first emitted paragraph unless it was
            // already emitted on its own
            let mut lead = Vec::new();
            if !article_matched && !paragraph_emitted {
                lead.push(highlight(&article.content, query));
            }
            if !paragraph.content.is_empty() {
                lead.push(highlight(&paragraph.content, query));
            }
            if !lead.is_empty() {
                blocks.push(lead.join(" "));
            }
            paragraph_emitted = true;
            blocks.extend(nested);
        }
    }

    (!blocks.is_empty()).then(|| blocks.join("<br>"))
}

/// Highlighted excerpts of one document, one entry per matching article.
pub fn document_excerpts(document: &StatuteDocument, query: &str) -> Vec<String> {
    let needle = clean(query);
    if needle.is_empty() {
        return Vec::new();
    }
    document
        .articles
        .iter()
        .filter_map(|article| article_excerpt(article, query, &needle))
        .collect()
}

/// Search statutes for `query` and collect highlighted excerpts, in search order.
///
/// Statutes that fail to fetch or contain no hit are omitted.
pub async fn search_keyword(
    repository: &dyn StatuteRepository,
    query: &str,
) -> Result<Vec<StatuteExcerpts>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(GaejeongError::InvalidInput("검색어가 비어 있습니다".to_string()));
    }

    let statutes = repository.search_statutes(query).await?;
    info!("'{}' search returned {} statutes", query, statutes.len());

    let mut results = Vec::new();
    for statute in &statutes {
        let document = match repository.fetch_statute(&statute.id).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Skipping {} ({}): {}", statute.name, statute.id, e);
                continue;
            }
        };

        let excerpts = document_excerpts(&document, query);
        if !excerpts.is_empty() {
            results.push(StatuteExcerpts {
                statute_name: statute.name.clone(),
                excerpts,
            });
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeKind;
    use pretty_assertions::assert_eq;

    fn node(kind: NodeKind, number: &str, content: &str, children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::new(kind, number, content).with_children(children)
    }

    #[test]
    fn test_highlight_wraps_every_occurrence() {
        assert_eq!(
            highlight("정의와 정의", "정의"),
            "<span style='color:red'>정의</span>와 <span style='color:red'>정의</span>"
        );
        assert_eq!(highlight("없음", "정의"), "없음");
        assert_eq!(highlight("<별표 1>", "별표"), "&lt;<span style='color:red'>별표</span> 1&gt;");
    }

    #[test]
    fn test_highlight_escapes_quotes_outside_span() {
        assert_eq!(
            highlight("\"정의\"와 '정의'", "정의"),
            "&quot;<span style='color:red'>정의</span>&quot;와 &#39;<span style='color:red'>정의</span>&#39;"
        );
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let text = "A&B <별표> \"정의\" '용어' &lt;";
        assert_eq!(escape_html(text), "A&amp;B &lt;별표&gt; &quot;정의&quot; &#39;용어&#39; &amp;lt;");
        assert_eq!(unescape_html(&escape_html(text)), text);
    }

    #[test]
    fn test_article_match_only() {
        let doc = StatuteDocument {
            name: "테스트법".to_string(),
            articles: vec![
                node(NodeKind::Article, "제1조", "제1조(목적) 이 법은 정의를 정한다.", vec![]),
                node(NodeKind::Article, "제2조", "제2조(기타)", vec![]),
            ],
        };

        assert_eq!(
            document_excerpts(&doc, "정의"),
            vec!["제1조(목적) 이 법은 <span style='color:red'>정의</span>를 정한다.".to_string()]
        );
    }

    #[test]
    fn test_paragraph_match_prefixes_article_once() {
        let doc = StatuteDocument {
            name: "테스트법".to_string(),
            articles: vec![node(
                NodeKind::Article,
                "제3조",
                "제3조(적용)",
                vec![
                    node(NodeKind::Paragraph, "1", "① 정의 규정", vec![]),
                    node(NodeKind::Paragraph, "2", "② 다른 규정", vec![]),
                    node(NodeKind::Paragraph, "3", "③ 정의 조항", vec![]),
                ],
            )],
        };

        assert_eq!(
            document_excerpts(&doc, "정의"),
            vec![
                "제3조(적용) ① <span style='color:red'>정의</span> 규정<br>③ <span style='color:red'>정의</span> 조항"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_items_and_sub_items_are_indented() {
        let sub_item = node(NodeKind::SubItem, "가", "가. 정의 첫 줄\n\n  정의 둘째 줄 ", vec![]);
        let item = node(NodeKind::Item, "1", "1. 정의", vec![sub_item]);
        let paragraph = node(NodeKind::Paragraph, "", "", vec![item]);
        let doc = StatuteDocument {
            name: "테스트법".to_string(),
            articles: vec![node(NodeKind::Article, "제2조", "제2조(정의)", vec![paragraph])],
        };

        let excerpts = document_excerpts(&doc, "정의");
        assert_eq!(excerpts.len(), 1);
        let blocks: Vec<&str> = excerpts[0].split("<br>").collect();
        assert!(blocks[0].starts_with("제2조(<span style='color:red'>정의</span>)"));
        assert!(excerpts[0].contains("&nbsp;&nbsp;1. <span style='color:red'>정의</span>"));
        assert!(excerpts[0].contains(
            "<div style='margin:0;padding:0'>&nbsp;&nbsp;&nbsp;&nbsp;가. <span style='color:red'>정의</span> 첫 줄"
        ));
        assert!(excerpts[0].contains("&nbsp;&nbsp;&nbsp;&nbsp;<span style='color:red'>정의</span> 둘째 줄</div>"));
    }

    #[test]
    fn test_whitespace_insensitive_match() {
        let doc = StatuteDocument {
            name: "테스트법".to_string(),
            articles: vec![node(NodeKind::Article, "제1조", "개인 정보", vec![])],
        };
        assert_eq!(document_excerpts(&doc, "개인정보").len(), 1);
        assert!(document_excerpts(&doc, "   ").is_empty());
    }
}
