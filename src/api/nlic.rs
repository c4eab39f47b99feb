use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use serde::Deserialize;

use super::client::{ClientConfig, StatuteRepository, SEARCH_PAGE_SIZE};
use super::deserializers::{single_or_vec, single_or_vec_or_null, text_or_lines};
use super::http_client::create_custom_client;
use super::types::StatuteRef;
use crate::document::{
    make_article_label, normalize_number, strip_period, DocumentNode, NodeKind, StatuteDocument,
};
use crate::error::{GaejeongError, Result};

const SERVICE_PATH: &str = "/DRF/lawService.do";
const SEARCH_PATH: &str = "/DRF/lawSearch.do";

/// NLIC (National Law Information Center) API client
pub struct NlicClient {
    config: ClientConfig,
    http_client: Client,
}

impl NlicClient {
    /// Create a new NLIC client; the API key is taken from `config` only
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = create_custom_client(config.timeout, &config.user_agent)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a GET request; no retries, non-success statuses become errors.
    async fn execute(&self, url: reqwest::Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GaejeongError::Timeout(self.config.timeout)
            } else {
                GaejeongError::Network(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GaejeongError::ApiError {
                code: status.as_u16().to_string(),
                message: format!("API request failed with status {}", status),
                hint: status
                    .is_server_error()
                    .then(|| "law.go.kr 서버에 일시적인 문제가 있습니다. 잠시 후 다시 시도하세요.".to_string()),
            })
        }
    }

    /// Read a JSON body, rejecting the HTML pages the API serves for bad keys.
    async fn read_json_body(&self, response: Response) -> Result<String> {
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let response_text = response.text().await.map_err(GaejeongError::Network)?;
        let trimmed = response_text.trim_start();

        if content_type.contains("text/html") || trimmed.starts_with('<') {
            return Err(GaejeongError::ApiError {
                code: "INVALID_RESPONSE".to_string(),
                message: "API returned HTML instead of JSON. This usually means the API key is invalid or the service is unavailable.".to_string(),
                hint: Some("'gaejeong config get law.key' 로 OC 값이 올바른지 확인하세요.".to_string()),
            });
        }

        if trimmed.is_empty() {
            return Err(GaejeongError::ApiError {
                code: "EMPTY_RESPONSE".to_string(),
                message: "API returned an empty response.".to_string(),
                hint: None,
            });
        }

        Ok(response_text)
    }
}

#[async_trait]
impl StatuteRepository for NlicClient {
    async fn search_page(&self, query: &str, page: u32) -> Result<Vec<StatuteRef>> {
        if self.config.api_key.is_empty() {
            return Err(GaejeongError::NoApiKey);
        }

        let exact_query = format!("\"{}\"", query);
        let params = [
            ("OC", self.config.api_key.clone()),
            ("target", "law".to_string()),
            ("type", "JSON".to_string()),
            ("display", SEARCH_PAGE_SIZE.to_string()),
            ("page", page.to_string()),
            ("search", "2".to_string()),
            ("knd", self.config.knd.clone()),
            ("query", exact_query),
        ];

        let url = reqwest::Url::parse_with_params(&self.endpoint(SEARCH_PATH), &params)
            .map_err(|e| GaejeongError::Parse(e.to_string()))?;

        let response = self.execute(url).await?;
        let response_text = self.read_json_body(response).await?;

        let raw: NlicSearchResponse = serde_json::from_str(&response_text).map_err(|e| {
            GaejeongError::Parse(format!(
                "Failed to parse search response: {}. Response starts with: {}",
                e,
                response_text.chars().take(100).collect::<String>()
            ))
        })?;

        Ok(raw.into_statute_refs())
    }

    async fn fetch_statute(&self, id: &str) -> Result<StatuteDocument> {
        if self.config.api_key.is_empty() {
            return Err(GaejeongError::NoApiKey);
        }

        let params = [
            ("OC", self.config.api_key.clone()),
            ("target", "law".to_string()),
            ("MST", id.to_string()),
            ("type", "JSON".to_string()),
        ];

        let url = reqwest::Url::parse_with_params(&self.endpoint(SERVICE_PATH), &params)
            .map_err(|e| GaejeongError::Parse(e.to_string()))?;

        let response = self.execute(url).await?;
        let response_text = self.read_json_body(response).await?;

        let raw: NlicDetailResponse = serde_json::from_str(&response_text)
            .map_err(|e| GaejeongError::Parse(format!("Failed to parse statute {}: {}", id, e)))?;

        let document = raw.law.into_document();
        info!(
            "Fetched statute {} ({}) with {} articles",
            document.name,
            id,
            document.articles.len()
        );
        Ok(document)
    }
}

// NLIC-specific response structures
// Search: { "LawSearch": { "totalCnt": "..", "law": [...] | {...} } }
#[derive(Debug, Deserialize)]
struct NlicSearchResponse {
    #[serde(rename = "LawSearch")]
    law_search: NlicSearchData,
}

#[derive(Debug, Deserialize)]
struct NlicSearchData {
    #[serde(rename = "totalCnt")]
    #[allow(dead_code)]
    total_count: Option<String>,
    #[serde(rename = "law", default, deserialize_with = "single_or_vec_or_null")]
    laws: Option<Vec<NlicLaw>>,
}

#[derive(Debug, Deserialize)]
struct NlicLaw {
    #[serde(rename = "법령명한글", default)]
    law_name: String,
    #[serde(rename = "법령일련번호", default)]
    law_no: String,
}

impl NlicSearchResponse {
    fn into_statute_refs(self) -> Vec<StatuteRef> {
        self.law_search
            .laws
            .unwrap_or_default()
            .into_iter()
            .map(|law| StatuteRef::new(law.law_name.trim(), law.law_no.trim()))
            .collect()
    }
}

// Detail: { "법령": { "기본정보": {...}, "조문": { "조문단위": [...] } } }
#[derive(Debug, Deserialize)]
struct NlicDetailResponse {
    #[serde(rename = "법령")]
    law: NlicDetailContent,
}

#[derive(Debug, Deserialize)]
struct NlicDetailContent {
    #[serde(rename = "기본정보", default)]
    basic_info: NlicBasicInfo,
    #[serde(rename = "조문", default)]
    articles: NlicArticles,
}

#[derive(Debug, Default, Deserialize)]
struct NlicBasicInfo {
    #[serde(rename = "법령명_한글", default)]
    law_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct NlicArticles {
    #[serde(rename = "조문단위", default, deserialize_with = "single_or_vec")]
    units: Vec<NlicArticle>,
}

#[derive(Debug, Deserialize)]
struct NlicArticle {
    #[serde(rename = "조문번호", default)]
    article_number: String,
    #[serde(rename = "조문가지번호", default)]
    branch_number: Option<String>,
    #[serde(rename = "조문여부", default)]
    unit_kind: Option<String>,
    #[serde(rename = "조문내용", default, deserialize_with = "text_or_lines")]
    article_content: String,
    #[serde(rename = "항", default, deserialize_with = "single_or_vec")]
    paragraphs: Vec<NlicParagraph>,
}

#[derive(Debug, Deserialize)]
struct NlicParagraph {
    #[serde(rename = "항번호", default)]
    number: String,
    #[serde(rename = "항내용", default, deserialize_with = "text_or_lines")]
    content: String,
    #[serde(rename = "호", default, deserialize_with = "single_or_vec")]
    items: Vec<NlicItem>,
}

#[derive(Debug, Deserialize)]
struct NlicItem {
    #[serde(rename = "호번호", default)]
    number: String,
    #[serde(rename = "호내용", default, deserialize_with = "text_or_lines")]
    content: String,
    #[serde(rename = "목", default, deserialize_with = "single_or_vec")]
    sub_items: Vec<NlicSubItem>,
}

#[derive(Debug, Deserialize)]
struct NlicSubItem {
    #[serde(rename = "목번호", default)]
    number: String,
    #[serde(rename = "목내용", default, deserialize_with = "text_or_lines")]
    content: String,
}

impl NlicDetailContent {
    fn into_document(self) -> StatuteDocument {
        let articles = self
            .articles
            .units
            .into_iter()
            // Chapter and section headings (전문) are not articles
            .filter(|unit| unit.unit_kind.as_deref() != Some("전문"))
            .map(NlicArticle::into_node)
            .collect();

        StatuteDocument {
            name: self.basic_info.law_name.trim().to_string(),
            articles,
        }
    }
}

impl NlicArticle {
    fn into_node(self) -> DocumentNode {
        let label = make_article_label(&self.article_number, self.branch_number.as_deref());
        let paragraphs = self
            .paragraphs
            .into_iter()
            .map(|p| {
                let items = p
                    .items
                    .into_iter()
                    .map(|item| {
                        let sub_items = item
                            .sub_items
                            .into_iter()
                            .map(|s| {
                                DocumentNode::new(NodeKind::SubItem, strip_period(&s.number), s.content)
                            })
                            .collect();
                        DocumentNode::new(NodeKind::Item, strip_period(&item.number), item.content)
                            .with_children(sub_items)
                    })
                    .collect();
                DocumentNode::new(NodeKind::Paragraph, normalize_number(&p.number), p.content)
                    .with_children(items)
            })
            .collect();

        DocumentNode::new(NodeKind::Article, label, self.article_content).with_children(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "법령": {
            "기본정보": { "법령명_한글": "개인정보 보호법", "법령ID": "011357" },
            "조문": {
                "조문단위": [
                    { "조문번호": "1", "조문여부": "전문", "조문내용": "제1장 총칙" },
                    {
                        "조문번호": "2",
                        "조문여부": "조문",
                        "조문내용": "제2조(정의) 이 법에서 사용하는 용어의 뜻은 다음과 같다.",
                        "항": {
                            "호": [
                                { "호번호": "1.", "호내용": "1. \"개인정보\"란 살아 있는 개인에 관한 정보로서",
                                  "목": [
                                      { "목번호": "가.", "목내용": [["가. 성명, 주민등록번호"]] },
                                      { "목번호": "나.", "목내용": "나. 다른 정보와 결합하여" }
                                  ] },
                                { "호번호": "2.", "호내용": "2. \"처리\"란" }
                            ]
                        }
                    },
                    {
                        "조문번호": "3",
                        "조문가지번호": "2",
                        "조문여부": "조문",
                        "조문내용": "제3조의2(보호원칙)",
                        "항": [
                            { "항번호": "①", "항내용": "① 개인정보처리자는" },
                            { "항번호": "②", "항내용": "② 개인정보처리자는" }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_detail_into_document() {
        let raw: NlicDetailResponse = serde_json::from_str(DETAIL_JSON).unwrap();
        let doc = raw.law.into_document();

        assert_eq!(doc.name, "개인정보 보호법");
        assert_eq!(doc.articles.len(), 2);

        let article2 = &doc.articles[0];
        assert_eq!(article2.number, "제2조");
        assert_eq!(article2.children.len(), 1);

        let unnumbered = &article2.children[0];
        assert_eq!(unnumbered.number, "");
        assert_eq!(unnumbered.children[0].number, "1");
        assert_eq!(unnumbered.children[0].children[0].number, "가");
        assert_eq!(unnumbered.children[0].children[0].content, "가. 성명, 주민등록번호");
        assert_eq!(unnumbered.children[1].number, "2");

        let article3 = &doc.articles[1];
        assert_eq!(article3.number, "제3조의2");
        assert_eq!(article3.children[1].number, "2");
    }

    #[test]
    fn test_search_response_single_and_missing() {
        let single = r#"{"LawSearch": {"totalCnt": "1", "law": {"법령명한글": " 민법 ", "법령일련번호": "254021"}}}"#;
        let raw: NlicSearchResponse = serde_json::from_str(single).unwrap();
        assert_eq!(raw.into_statute_refs(), vec![StatuteRef::new("민법", "254021")]);

        let empty = r#"{"LawSearch": {"totalCnt": "0"}}"#;
        let raw: NlicSearchResponse = serde_json::from_str(empty).unwrap();
        assert!(raw.into_statute_refs().is_empty());
    }

    #[tokio::test]
    async fn test_no_api_key() {
        let client = NlicClient::new(ClientConfig::default()).unwrap();
        assert!(matches!(
            client.search_page("정의", 1).await,
            Err(GaejeongError::NoApiKey)
        ));
        assert!(matches!(
            client.fetch_statute("1").await,
            Err(GaejeongError::NoApiKey)
        ));
    }
}
