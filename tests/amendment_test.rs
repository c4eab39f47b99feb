use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use gaejeong::amendment::{Amender, NO_AMENDMENT_TARGETS};
use gaejeong::api::{ClientConfig, NlicClient};
use gaejeong::error::GaejeongError;
use gaejeong::{generate_amendment_clauses, search_keyword};

fn client_for(server: &ServerGuard) -> NlicClient {
    NlicClient::new(ClientConfig {
        api_key: "test_key".to_string(),
        base_url: server.url(),
        ..Default::default()
    })
    .unwrap()
}

async fn mock_search(server: &mut ServerGuard, laws: Value) -> Mock {
    server
        .mock("GET", "/DRF/lawSearch.do")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "LawSearch": { "totalCnt": "1", "law": laws } }).to_string())
        .create_async()
        .await
}

async fn mock_statute(server: &mut ServerGuard, mst: &str, name: &str, units: Value) -> Mock {
    server
        .mock("GET", "/DRF/lawService.do")
        .match_query(Matcher::UrlEncoded("MST".to_string(), mst.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "법령": {
                    "기본정보": { "법령명_한글": name },
                    "조문": { "조문단위": units }
                }
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_single_statute_amendment() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, json!({ "법령명한글": "테스트법", "법령일련번호": "1" })).await;
    let _statute = mock_statute(
        &mut server,
        "1",
        "테스트법",
        json!({ "조문번호": "3", "조문여부": "조문", "조문내용": "정의란 이런 것이다" }),
    )
    .await;

    let client = client_for(&server);
    let lines = generate_amendment_clauses(&client, "정의", "개념").await.unwrap();

    assert_eq!(
        lines,
        vec!["① 테스트법 일부를 다음과 같이 개정한다.\n제3조 중 \"정의\"를 \"개념\"으로 한다.".to_string()]
    );
}

#[tokio::test]
async fn test_grouped_locations_across_structure() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, json!({ "법령명한글": "도시법", "법령일련번호": "7" })).await;
    let _statute = mock_statute(
        &mut server,
        "7",
        "도시법",
        json!([
            { "조문번호": "1", "조문여부": "전문", "조문내용": "제1장 시장의 책무" },
            {
                "조문번호": "5",
                "조문여부": "조문",
                "조문내용": "제5조(책무)",
                "항": [
                    { "항번호": "①", "항내용": "① 시장은 계획을 세운다." },
                    {
                        "항번호": "②",
                        "항내용": "② 다음 사항을 정한다.",
                        "호": [
                            { "호번호": "1.", "호내용": "1. 시장은 보고한다" },
                            { "호번호": "2.", "호내용": "2. 시장은 공고한다" }
                        ]
                    }
                ]
            },
            { "조문번호": "9", "조문가지번호": "2", "조문여부": "조문", "조문내용": "제9조의2 시장은 협의한다." }
        ]),
    )
    .await;

    let client = client_for(&server);
    let report = Amender::new(&client).report("시장", "도지사").await.unwrap();

    assert_eq!(report.sentences.len(), 1);
    assert_eq!(
        report.sentences[0].clause_lines,
        vec!["제5조제1항ㆍ제2항제1호ㆍ제2항제2호 및 제9조의2 중 \"시장\"은 \"도지사\"는 한다.".to_string()]
    );
}

#[tokio::test]
async fn test_failed_statute_is_skipped() {
    let mut server = Server::new_async().await;
    let _search = mock_search(
        &mut server,
        json!([
            { "법령명한글": "가법", "법령일련번호": "1" },
            { "법령명한글": "나법", "법령일련번호": "2" }
        ]),
    )
    .await;
    let _failing = server
        .mock("GET", "/DRF/lawService.do")
        .match_query(Matcher::UrlEncoded("MST".to_string(), "1".to_string()))
        .with_status(500)
        .create_async()
        .await;
    let _statute = mock_statute(
        &mut server,
        "2",
        "나법",
        json!({ "조문번호": "1", "조문여부": "조문", "조문내용": "제1조 정의에 따른다." }),
    )
    .await;

    let client = client_for(&server);
    let lines = generate_amendment_clauses(&client, "정의", "개념").await.unwrap();

    assert_eq!(
        lines,
        vec!["② 나법 일부를 다음과 같이 개정한다.\n제1조 중 \"정의\"를 \"개념\"으로 한다.".to_string()]
    );
}

#[tokio::test]
async fn test_no_search_results_yield_sentinel() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/DRF/lawSearch.do")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"LawSearch": {"totalCnt": "0"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let lines = generate_amendment_clauses(&client, "존재하지않는단어", "개념").await.unwrap();
    assert_eq!(lines, vec![NO_AMENDMENT_TARGETS.to_string()]);
}

#[tokio::test]
async fn test_missing_api_key_is_reported() {
    let client = NlicClient::new(ClientConfig::default()).unwrap();
    let result = generate_amendment_clauses(&client, "정의", "개념").await;
    assert!(matches!(result, Err(GaejeongError::NoApiKey)));
}

#[tokio::test]
async fn test_keyword_search_highlights_matches() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, json!({ "법령명한글": "테스트법", "법령일련번호": "1" })).await;
    let _statute = mock_statute(
        &mut server,
        "1",
        "테스트법",
        json!([
            { "조문번호": "1", "조문여부": "조문", "조문내용": "제1조(목적) 이 법은 목적을 정한다." },
            { "조문번호": "2", "조문여부": "조문", "조문내용": "제2조(정의) 용어의 뜻은 다음과 같다." }
        ]),
    )
    .await;

    let client = client_for(&server);
    let results = search_keyword(&client, "정의").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].statute_name, "테스트법");
    assert_eq!(
        results[0].excerpts,
        vec!["제2조(<span style='color:red'>정의</span>) 용어의 뜻은 다음과 같다.".to_string()]
    );
}
