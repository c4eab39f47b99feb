//! Structural citations ("제3조제2항제1호") and their compact merged form.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static ARTICLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(제\d+조(?:의\d+)?)(.*)$").expect("valid article regex"));

/// Path from the statute root to the node holding a match.
///
/// `article` is the full label ("제3조", "제3조의2"); the other levels hold
/// bare numbers ("2", "1의2", "가").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub article: String,
    pub paragraph: Option<String>,
    pub item: Option<String>,
    pub sub_item: Option<String>,
}

impl Location {
    pub fn article(label: impl Into<String>) -> Self {
        Self {
            article: label.into(),
            paragraph: None,
            item: None,
            sub_item: None,
        }
    }

    pub fn with_paragraph(mut self, number: Option<String>) -> Self {
        self.paragraph = number;
        self
    }

    pub fn with_item(mut self, number: Option<String>) -> Self {
        self.item = number;
        self
    }

    pub fn with_sub_item(mut self, number: Option<String>) -> Self {
        self.sub_item = number;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_location(self))
    }
}

/// Render a location as a citation, skipping absent levels.
pub fn format_location(loc: &Location) -> String {
    let mut out = loc.article.clone();
    if let Some(paragraph) = &loc.paragraph {
        out.push_str(&format!("제{}항", paragraph));
    }
    if let Some(item) = &loc.item {
        out.push_str(&format!("제{}호", item));
    }
    if let Some(sub_item) = &loc.sub_item {
        out.push_str(&format!("{}목", sub_item));
    }
    out
}

/// Merge formatted citations into one compact citation.
///
/// Citations sharing an article are written once with their remainders
/// joined by "ㆍ" ("제3조제1항ㆍ제2항").
///
/// In amendment drafting "제3조 중" addresses every paragraph and item of
/// 제3조, so a bare article citation absorbs the other citations of that
/// article instead of being listed beside them.
/// Articles keep their first-seen order and are joined as
/// "A 및 B" or "A, B 및 C".
pub fn group_locations<S: AsRef<str>>(locations: &[S]) -> String {
    // (article, remainders, whole article cited)
    let mut groups: Vec<(String, Vec<String>, bool)> = Vec::new();

    for location in locations {
        let location = location.as_ref();
        let (article, rest) = match ARTICLE_PREFIX.captures(location) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (location.to_string(), String::new()),
        };

        let index = match groups.iter().position(|(a, _, _)| *a == article) {
            Some(index) => index,
            None => {
                groups.push((article, Vec::new(), false));
                groups.len() - 1
            }
        };

        let (_, rests, whole) = &mut groups[index];
        if rest.is_empty() {
            *whole = true;
        } else if !rests.contains(&rest) {
            rests.push(rest);
        }
    }

    let rendered: Vec<String> = groups
        .into_iter()
        .map(|(article, rests, whole)| {
            if whole || rests.is_empty() {
                article
            } else {
                format!("{}{}", article, rests.join("ㆍ"))
            }
        })
        .collect();

    match rendered.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{} 및 {}", init.join(", "), last),
    }
}
