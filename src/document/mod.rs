//! Statute document tree: article → paragraph → item → sub-item.

use crate::amendment::location::Location;

/// Structural level of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// 조
    Article,
    /// 항
    Paragraph,
    /// 호
    Item,
    /// 목
    SubItem,
}

/// One node of the statute tree.
///
/// `number` is the article label ("제3조의2") for articles and the bare
/// number for the other levels ("2", "1의2", "가"). An unnumbered paragraph
/// has an empty number.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    pub kind: NodeKind,
    pub number: String,
    pub content: String,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(kind: NodeKind, number: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            number: number.into(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }
}

/// A fetched statute.
#[derive(Debug, Clone, PartialEq)]
pub struct StatuteDocument {
    pub name: String,
    pub articles: Vec<DocumentNode>,
}

impl StatuteDocument {
    /// Visit every node in document order together with its location.
    pub fn visit<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&Location, &'a DocumentNode),
    {
        for article in &self.articles {
            let location = Location::article(article.number.clone());
            visit_node(article, &location, &mut f);
        }
    }
}

fn visit_node<'a, F>(node: &'a DocumentNode, location: &Location, f: &mut F)
where
    F: FnMut(&Location, &'a DocumentNode),
{
    f(location, node);
    for child in &node.children {
        let number = (!child.number.is_empty()).then(|| child.number.clone());
        let child_location = match child.kind {
            NodeKind::Article => Location::article(child.number.clone()),
            NodeKind::Paragraph => location.clone().with_paragraph(number),
            NodeKind::Item => location.clone().with_item(number),
            NodeKind::SubItem => location.clone().with_sub_item(number),
        };
        visit_node(child, &child_location, f);
    }
}

/// "제{n}조", or "제{n}조의{branch}" for a non-zero branch number.
pub fn make_article_label(number: &str, branch: Option<&str>) -> String {
    match branch.map(str::trim) {
        Some(branch) if !branch.is_empty() && branch != "0" => {
            format!("제{}조의{}", number.trim(), branch)
        }
        _ => format!("제{}조", number.trim()),
    }
}

/// Paragraph numbers arrive as circled numerals; turn them into digits.
pub fn normalize_number(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return text.to_string();
    };

    let value = match c as u32 {
        // ① .. ⑳
        code @ 0x2460..=0x2473 => code - 0x2460 + 1,
        // ㉑ .. ㉟
        code @ 0x3251..=0x325F => code - 0x3251 + 21,
        // ㊱ .. ㊿
        code @ 0x32B1..=0x32BF => code - 0x32B1 + 36,
        _ => return text.to_string(),
    };
    value.to_string()
}

/// Item and sub-item numbers carry a trailing period ("1.", "가.").
pub fn strip_period(text: &str) -> String {
    text.trim().replace('.', "")
}
