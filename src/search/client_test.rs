// ABOUTME: Tests for the Brave client against a one-shot local HTTP responder.
// ABOUTME: Covers request shape, status mapping, decoding, and missing keys.

use std::time::Duration;

use secrecy::SecretString;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::BraveClient;
use crate::error::SearchError;

/// Serve exactly one HTTP response and return the raw request head.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&head).to_string()
    });

    (format!("http://{}/res/v1/web/search", addr), handle)
}

fn client(endpoint: &str, key: Option<&str>) -> BraveClient {
    BraveClient::new(
        key.map(|k| SecretString::from(k.to_string())),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_endpoint(endpoint)
}

#[tokio::test]
async fn test_search_sends_query_and_token() {
    let body = r#"{"query":{"original":"rust & tokio"},"web":{"results":[{"title":"T","url":"https://t.example","description":"D"}]}}"#;
    let (endpoint, server) = serve_once("200 OK", body).await;

    let response = client(&endpoint, Some("secret-token"))
        .search("rust & tokio", 5)
        .await
        .unwrap();
    assert_eq!(response.web_results()[0].title, "T");

    let head = server.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /res/v1/web/search?q=rust%20%26%20tokio&count=5 "));
    assert!(head.contains("x-subscription-token: secret-token"));
    assert!(head.contains("accept: application/json"));
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (endpoint, server) = serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#).await;

    let err = client(&endpoint, Some("k")).search("q", 10).await.unwrap_err();
    match err {
        SearchError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_deserialize_error() {
    let (endpoint, server) = serve_once("200 OK", "not json").await;

    let err = client(&endpoint, Some("k")).search("q", 10).await.unwrap_err();
    assert!(matches!(err, SearchError::Deserialize(_)), "got {:?}", err);
    server.await.unwrap();
}

#[tokio::test]
async fn test_missing_api_key_fails_without_request() {
    let err = client("http://127.0.0.1:9/unused", None)
        .search("q", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Configuration(_)));
    assert!(err.to_string().contains("BRAVE_API_KEY"));
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Bind and drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let err = client(&format!("http://{}/search", addr), Some("k"))
        .search("q", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Http(_)), "got {:?}", err);
}

#[test]
fn test_debug_hides_key() {
    let client = BraveClient::with_client(
        reqwest::Client::new(),
        Some(SecretString::from("hunter2".to_string())),
    );
    let debug = format!("{:?}", client);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("has_api_key: true"));
    assert_eq!(client.endpoint(), super::DEFAULT_ENDPOINT);
}
