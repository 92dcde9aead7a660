// tests/adapter_gnews.rs
use logistics_radar::fetch::adapters::gnews_api::GnewsApiAdapter;
use logistics_radar::fetch::types::{SourceAdapter, Topic};
use mockito::Matcher;

#[tokio::test]
async fn search_response_is_normalized_into_articles() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "port congestion".into()),
            Matcher::UrlEncoded("lang".into(), "en".into()),
            Matcher::UrlEncoded("country".into(), "us".into()),
            Matcher::UrlEncoded("max".into(), "10".into()),
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            Matcher::UrlEncoded("sortby".into(), "publishedAt".into()),
            Matcher::Regex("from=".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "totalArticles": 2,
                "articles": [
                    {
                        "title": "Port congestion eases on the US west coast",
                        "description": "Queue lengths at anchor are back to 2019 levels.",
                        "url": "https://example.com/ports/1",
                        "publishedAt": "2025-03-14T10:00:00Z",
                        "source": {"name": "Example Wire", "url": "https://example.com"}
                    },
                    {
                        "title": "Untitled source and description fall back",
                        "url": "https://example.com/ports/2",
                        "publishedAt": "2025-03-14T11:00:00Z"
                    }
                ]
            }"#,
        )
        .create_async()
        .await;

    let adapter = GnewsApiAdapter::new(Some("test-key".to_string()))
        .with_endpoint(format!("{}/search", server.url()));
    let topic = Topic::new("port congestion");

    let articles = adapter.fetch_candidates(&topic).await.expect("fetch ok");
    m.assert_async().await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].source, "Example Wire");
    assert_eq!(articles[0].published, "2025-03-14T10:00:00Z");
    assert_eq!(articles[1].source, "Unknown");
    assert_eq!(articles[1].content, articles[1].title);
}

#[tokio::test]
async fn missing_articles_field_is_zero_results_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"totalArticles": 0}"#)
        .create_async()
        .await;

    let adapter = GnewsApiAdapter::new(Some("test-key".to_string()))
        .with_endpoint(format!("{}/search", server.url()));
    let articles = adapter
        .fetch_candidates(&Topic::new("anything"))
        .await
        .expect("fetch ok");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn missing_api_key_is_zero_results_without_a_request() {
    let adapter =
        GnewsApiAdapter::new(None).with_endpoint("http://127.0.0.1:9/unreachable".to_string());
    let articles = adapter
        .fetch_candidates(&Topic::new("anything"))
        .await
        .expect("fetch ok");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn server_error_propagates_as_adapter_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"errors": ["bad api key"]}"#)
        .create_async()
        .await;

    let adapter = GnewsApiAdapter::new(Some("bad-key".to_string()))
        .with_endpoint(format!("{}/search", server.url()));
    assert!(adapter.fetch_candidates(&Topic::new("x")).await.is_err());
}
