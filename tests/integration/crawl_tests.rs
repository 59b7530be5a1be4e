//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use hostwalk::config::Config;
use hostwalk::crawler::{crawl, run_crawl, CancelSignal};
use hostwalk::CrawlError;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an HTML response whose body links to each of `links`
fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    let body = format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        anchors
    );
    // `set_body_string` would pin the content type to text/plain
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Mounts a GET mock serving `links` at `page_path`, expected to be fetched exactly once
async fn mount_page(server: &MockServer, page_path: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(links))
        .expect(1)
        .mount(server)
        .await;
}

fn expected(base_url: &str, paths: &[&str]) -> HashSet<String> {
    paths
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect()
}

#[tokio::test]
async fn test_crawl_linear_chain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/b"]).await;
    mount_page(&mock_server, "/b", &["c"]).await;
    mount_page(&mock_server, "/c", &[]).await;

    let visited = crawl(&format!("{}/", base_url), 4, 5)
        .await
        .expect("crawl should succeed");

    assert_eq!(visited, expected(&base_url, &["/", "/b", "/c"]));
}

#[tokio::test]
async fn test_crawl_cycle_fetches_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/b", "/"]).await;
    mount_page(&mock_server, "/b", &["/", "/b"]).await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/b"]));
    // `expect(1)` on each mock is verified when the server drops
}

#[tokio::test]
async fn test_cross_host_links_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    // Same server, but reached through a different host name
    let other_host = format!("http://localhost:{}/other", port);
    mount_page(&mock_server, "/", &[&other_host, "https://example.invalid/"]).await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/"]));
}

#[tokio::test]
async fn test_fetch_failure_is_dead_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/missing", "/broken"]).await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // `/missing` falls through to wiremock's default 404
    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/missing", "/broken"]));
}

#[tokio::test]
async fn test_fragment_links_collapse_to_one_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/p#a", "/p#b", "#top", "/p"]).await;
    mount_page(&mock_server, "/p", &["/#footer"]).await;

    let visited = crawl(&format!("{}/#intro", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/p"]));
}

#[tokio::test]
async fn test_binary_pages_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/logo.png"]).await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/hidden">x</a>"#, "image/png"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/logo.png"]));
}

#[tokio::test]
async fn test_mislabelled_text_page_is_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/notes.txt"]).await;

    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/found">x</a>"#, "text/plain"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/found", &[]).await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/notes.txt", "/found"]));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/slow"]).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page(&["/never"]).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let visited = crawl(&format!("{}/", base_url), 4, 1).await.unwrap();

    assert_eq!(visited, expected(&base_url, &["/", "/slow"]));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/old"]).await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/new", &["/child"]).await;
    mount_page(&mock_server, "/child", &[]).await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    assert!(visited.contains(&format!("{}/old", base_url)));
    assert!(visited.contains(&format!("{}/child", base_url)));
}

#[tokio::test]
async fn test_retry_recovers_from_server_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/flaky"]).await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/flaky", &["/after"]).await;
    mount_page(&mock_server, "/after", &[]).await;

    let mut config = Config::default();
    config.http.max_retries = 2;
    config.http.retry_delay_ms = 10;

    let report = run_crawl(&config, &format!("{}/", base_url), CancelSignal::new())
        .await
        .unwrap();

    assert_eq!(
        report.visited,
        expected(&base_url, &["/", "/flaky", "/after"])
    );
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let user_agent = format!("hostwalk/{}", env!("CARGO_PKG_VERSION"));

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(html_page(&["/next"]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let visited = crawl(&format!("{}/", base_url), 2, 5).await.unwrap();
    assert_eq!(visited.len(), 2);
}

#[tokio::test]
async fn test_single_worker_crawls_whole_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let pages: Vec<String> = (0..10).map(|i| format!("/page{}", i)).collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    mount_page(&mock_server, "/", &page_refs).await;
    for page in &page_refs {
        // Every page links back to the whole site
        mount_page(&mock_server, page, &page_refs).await;
    }

    let mut config = Config::default();
    config.crawler.pool_size = 1;

    let report = run_crawl(&config, &format!("{}/", base_url), CancelSignal::new())
        .await
        .unwrap();

    assert_eq!(report.visited.len(), 11);
    assert!(!report.cancelled);
    assert_eq!(report.stats.expanded, 11);
    assert_eq!(report.stats.tasks_submitted, report.stats.tasks_finished());
}

#[tokio::test]
async fn test_cancelled_crawl_returns_partial_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/slow"]).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page(&["/never"]).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.crawler.request_timeout = 30;

    let cancel = CancelSignal::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        run_crawl(&config, &format!("{}/", base_url), cancel),
    )
    .await
    .expect("cancellation should end the crawl promptly")
    .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.visited, expected(&base_url, &["/", "/slow"]));
}

#[tokio::test]
async fn test_hostless_start_url_yields_empty_set() {
    let visited = crawl("not a url", 4, 5).await.unwrap();
    assert!(visited.is_empty());

    let visited = crawl("mailto:someone@example.com", 4, 5).await.unwrap();
    assert!(visited.is_empty());
}

#[tokio::test]
async fn test_non_http_start_url_is_visited_and_fails_quietly() {
    // reqwest refuses the scheme before touching the network
    let visited = crawl("ftp://127.0.0.1:9/pub/", 4, 5).await.unwrap();
    assert_eq!(visited, HashSet::from(["ftp://127.0.0.1:9/pub/".to_string()]));
}

#[tokio::test]
async fn test_same_host_ftp_link_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let ftp_link = format!("ftp://127.0.0.1:{}/file", mock_server.address().port());

    mount_page(&mock_server, "/", &[&ftp_link]).await;

    let visited = crawl(&format!("{}/", base_url), 4, 5).await.unwrap();

    let mut wanted = expected(&base_url, &["/"]);
    wanted.insert(ftp_link);
    assert_eq!(visited, wanted);
}

#[tokio::test]
async fn test_oversized_concurrency_rejected() {
    let result = crawl("https://example.com/", usize::MAX, 5).await;
    assert!(matches!(result, Err(CrawlError::Config(_))));
}
