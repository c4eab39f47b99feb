use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::clause::{group, render_group};
use super::scanner::find_occurrences;
use crate::api::{StatuteRef, StatuteRepository};
use crate::document::StatuteDocument;
use crate::error::{GaejeongError, Result};

/// Returned alone when no statute yields a clause.
pub const NO_AMENDMENT_TARGETS: &str = "⚠️ 개정 대상 조문이 없습니다.";

/// Statute indices below this get an enclosed numeral (① .. ⑳).
const CIRCLED_LIMIT: usize = 20;

/// The amendment block for one statute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmendmentSentence {
    pub statute_name: String,
    pub header: String,
    pub clause_lines: Vec<String>,
}

impl AmendmentSentence {
    /// Header and clauses, one per line.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.clause_lines.len() + 1);
        lines.push(self.header.as_str());
        lines.extend(self.clause_lines.iter().map(String::as_str));
        lines.join("\n")
    }
}

/// Everything produced for one (find, replace) pair.
#[derive(Debug, Clone, Serialize)]
pub struct AmendmentReport {
    pub find_word: String,
    pub replace_word: String,
    pub statutes_searched: usize,
    pub sentences: Vec<AmendmentSentence>,
    pub generated_at: DateTime<Utc>,
}

impl AmendmentReport {
    /// Rendered blocks in search order, or the no-target sentinel.
    pub fn to_lines(&self) -> Vec<String> {
        if self.sentences.is_empty() {
            vec![NO_AMENDMENT_TARGETS.to_string()]
        } else {
            self.sentences.iter().map(AmendmentSentence::render).collect()
        }
    }
}

/// ① for index 0 up to ⑳ for index 19, then plain `idx + 1`.
pub fn circled_number(idx: usize) -> String {
    if idx < CIRCLED_LIMIT {
        char::from_u32(0x2460 + idx as u32)
            .map(String::from)
            .unwrap_or_else(|| (idx + 1).to_string())
    } else {
        (idx + 1).to_string()
    }
}

/// Scan, group and render one statute. Empty when nothing matched.
pub fn amend_document(document: &StatuteDocument, find_word: &str, replace_word: &str) -> Vec<String> {
    let mut occurrences = Vec::new();
    document.visit(|location, node| {
        occurrences.extend(find_occurrences(&node.content, location, find_word, replace_word));
    });
    debug!("{}: {} occurrences of '{}'", document.name, occurrences.len(), find_word);

    group(occurrences).iter().map(render_group).collect()
}

/// Generates amendment clauses across every statute matching the find word.
pub struct Amender<'a> {
    repository: &'a dyn StatuteRepository,
    concurrency: usize,
}

impl<'a> Amender<'a> {
    pub fn new(repository: &'a dyn StatuteRepository) -> Self {
        Self {
            repository,
            concurrency: 1,
        }
    }

    /// Number of statutes fetched at once. Output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn report(&self, find_word: &str, replace_word: &str) -> Result<AmendmentReport> {
        let find_word = find_word.trim();
        let replace_word = replace_word.trim();
        if find_word.is_empty() {
            return Err(GaejeongError::InvalidInput("찾을 단어가 비어 있습니다".to_string()));
        }

        let statutes = self.repository.search_statutes(find_word).await?;
        info!("'{}' appears in {} statutes", find_word, statutes.len());

        let sentences: Vec<AmendmentSentence> = stream::iter(statutes.iter().enumerate())
            .map(|(idx, statute)| self.amend_statute(idx, statute, find_word, replace_word))
            .buffered(self.concurrency)
            .filter_map(|sentence| async move { sentence })
            .collect()
            .await;

        Ok(AmendmentReport {
            find_word: find_word.to_string(),
            replace_word: replace_word.to_string(),
            statutes_searched: statutes.len(),
            sentences,
            generated_at: Utc::now(),
        })
    }

    async fn amend_statute(
        &self,
        idx: usize,
        statute: &StatuteRef,
        find_word: &str,
        replace_word: &str,
    ) -> Option<AmendmentSentence> {
        let document = match self.repository.fetch_statute(&statute.id).await {
            Ok(document) => document,
            Err(e) if e.is_transport_failure() => {
                warn!("Skipping {} ({}): fetch failed: {}", statute.name, statute.id, e);
                return None;
            }
            Err(e) => {
                warn!("Skipping {} ({}): malformed document: {}", statute.name, statute.id, e);
                return None;
            }
        };

        let clause_lines = amend_document(&document, find_word, replace_word);
        if clause_lines.is_empty() {
            debug!("{}: no amendment targets", statute.name);
            return None;
        }

        Some(AmendmentSentence {
            statute_name: statute.name.clone(),
            header: format!(
                "{} {} 일부를 다음과 같이 개정한다.",
                circled_number(idx),
                statute.name
            ),
            clause_lines,
        })
    }
}

/// Amendment blocks for every statute containing `find_word`, in search order,
/// or the single no-target sentinel.
pub async fn generate_amendment_clauses(
    repository: &dyn StatuteRepository,
    find_word: &str,
    replace_word: &str,
) -> Result<Vec<String>> {
    let report = Amender::new(repository).report(find_word, replace_word).await?;
    Ok(report.to_lines())
}
