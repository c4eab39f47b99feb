use async_trait::async_trait;
use log::{debug, warn};

use super::types::StatuteRef;
use crate::document::StatuteDocument;
use crate::error::{GaejeongError, Result};

/// Statutes returned per search page; a shorter page is the last one.
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Source of statutes: exact-phrase search and full-text fetch by MST.
#[async_trait]
pub trait StatuteRepository: Send + Sync {
    /// Fetch one page (1-based) of exact-phrase search results
    async fn search_page(&self, query: &str, page: u32) -> Result<Vec<StatuteRef>>;

    /// Fetch the full document tree of one statute
    async fn fetch_statute(&self, id: &str) -> Result<StatuteDocument>;

    /// Collect every search page until one comes back short.
    ///
    /// A failing page ends the pagination with whatever was gathered so far;
    /// only a missing API key is reported as an error.
    async fn search_statutes(&self, query: &str) -> Result<Vec<StatuteRef>> {
        let mut statutes = Vec::new();
        let mut page = 1;

        loop {
            match self.search_page(query, page).await {
                Ok(batch) => {
                    let count = batch.len();
                    debug!("Search page {} for '{}' returned {} statutes", page, query, count);
                    statutes.extend(batch);
                    if count < SEARCH_PAGE_SIZE {
                        break;
                    }
                    page += 1;
                }
                Err(GaejeongError::NoApiKey) => return Err(GaejeongError::NoApiKey),
                Err(e) => {
                    warn!("Search page {} for '{}' failed, stopping pagination: {}", page, query, e);
                    break;
                }
            }
        }

        Ok(statutes)
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key (OC)
    pub api_key: String,
    /// Scheme and host of the DRF endpoints
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Statute kind filter for searches (knd)
    pub knd: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.law.go.kr".to_string(),
            timeout: 10,
            knd: "A0002".to_string(),
            user_agent: format!("gaejeong/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
