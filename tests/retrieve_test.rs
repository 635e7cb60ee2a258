//! Retrieval tests against a one-shot local HTTP server.

use rs_article_parser::{fetch_article, fetch_html, Error, FetchOptions, DEFAULT_USER_AGENT};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one response and hand back the raw request head.
async fn serve_once(
    status: &'static str,
    content_type: Option<&'static str>,
    body: Vec<u8>,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let mut head = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n", body.len());
        if let Some(content_type) = content_type {
            head.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        head.push_str("\r\n");

        stream.write_all(head.as_bytes()).await.unwrap();
        stream.write_all(&body).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/article"), server)
}

fn header<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    request.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

#[tokio::test]
async fn status_404_is_network_error() {
    let (url, server) = serve_once("404 Not Found", Some("text/html"), b"missing".to_vec()).await;

    let result = fetch_html(&url, &FetchOptions::default()).await;

    match result {
        Err(Error::Network { status }) => assert_eq!(status, 404),
        other => panic!("expected network error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn status_500_is_network_error() {
    let (url, server) = serve_once("500 Internal Server Error", None, Vec::new()).await;

    let err = fetch_html(&url, &FetchOptions::default()).await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed with error code 500");
    server.await.unwrap();
}

#[tokio::test]
async fn json_content_type_is_rejected() {
    let (url, server) = serve_once("200 OK", Some("application/json"), b"{}".to_vec()).await;

    let result = fetch_html(&url, &FetchOptions::default()).await;

    match result {
        Err(Error::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "application/json");
        }
        other => panic!("expected unsupported content type, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn html_body_is_returned_unchanged() {
    let body = "<html><head><title>T</title></head><body><p>Hello</p></body></html>";
    let (url, server) = serve_once("200 OK", Some("text/html; charset=utf-8"), body.as_bytes().to_vec()).await;

    let html = fetch_html(&url, &FetchOptions::default()).await.unwrap();

    assert_eq!(html, body);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /article HTTP/1.1"));
    assert_eq!(header(&request, "user-agent"), Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn missing_content_type_defaults_to_html() {
    let (url, server) = serve_once("200 OK", None, b"<p>plain</p>".to_vec()).await;

    let html = fetch_html(&url, &FetchOptions::default()).await.unwrap();

    assert_eq!(html, "<p>plain</p>");
    server.await.unwrap();
}

#[tokio::test]
async fn other_text_types_are_accepted() {
    let (url, server) = serve_once("200 OK", Some("text/plain"), b"just text".to_vec()).await;

    let text = fetch_html(&url, &FetchOptions::default()).await.unwrap();

    assert_eq!(text, "just text");
    server.await.unwrap();
}

#[tokio::test]
async fn custom_client_and_user_agent_are_used() {
    let (url, server) = serve_once("200 OK", Some("text/html"), b"<p>ok</p>".to_vec()).await;

    let options = FetchOptions {
        client: Some(reqwest::Client::builder().build().unwrap()),
        user_agent: Some("article-test/1.0".to_string()),
    };
    fetch_html(&url, &options).await.unwrap();

    let request = server.await.unwrap();
    assert_eq!(header(&request, "user-agent"), Some("article-test/1.0"));
}

#[tokio::test]
async fn header_charset_is_used_for_decoding() {
    let (url, server) = serve_once("200 OK", Some("text/html; charset=windows-1252"), b"<p>caf\xE9</p>".to_vec()).await;

    let html = fetch_html(&url, &FetchOptions::default()).await.unwrap();

    assert_eq!(html, "<p>caf\u{e9}</p>");
    server.await.unwrap();
}

#[tokio::test]
async fn fetch_article_extracts_with_url_as_source() {
    let paragraph = "Local servers make retrieval tests deterministic and fast. The body below is long \
        enough to pass the content threshold, and the page declares no URL of its own, so the \
        fetched address becomes the only candidate for the article link.";
    let body = format!(
        "<html><head><title>Local Article</title></head><body><article><h1>Local Article</h1>\
         <p>{paragraph}</p><p>{paragraph}</p><p>{paragraph}</p></article></body></html>"
    );
    let (url, server) = serve_once("200 OK", Some("text/html"), body.into_bytes()).await;

    let article = fetch_article(&url, &FetchOptions::default()).await.unwrap();

    let article = article.expect("article");
    assert_eq!(article.url, url);
    assert_eq!(article.title, "Local Article");
    let host = url.trim_start_matches("http://").trim_end_matches("/article");
    assert!(host.starts_with("127.0.0.1:"));
    assert_eq!(article.source, host);
    server.await.unwrap();
}
