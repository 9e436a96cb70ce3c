//! Integration tests for the navigation search
//!
//! These tests use wiremock to serve small sites and drive the HTTP
//! renderer and the navigation search together end-to-end.

use click_distance::config::NavigationConfig;
use click_distance::navigation::{NavigationRequest, NavigationSearch, SearchState};
use click_distance::render::HttpRenderer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an HTTP renderer with a plain client
fn create_renderer(respect_robots: bool) -> HttpRenderer {
    HttpRenderer::with_client(reqwest::Client::new(), "TestBot".to_string(), respect_robots)
}

fn navigation(level_threshold: u32) -> NavigationConfig {
    NavigationConfig {
        level_threshold,
        max_concurrent_renders: 4,
    }
}

/// An HTML page linking to the given paths on `base`
fn html_page(base: &str, paths: &[&str]) -> ResponseTemplate {
    let anchors: String = paths
        .iter()
        .map(|p| format!(r#"<a href="{}{}">{}</a>"#, base, p, p))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "<html><head><title>Test</title></head><body>\n{}\n</body></html>",
        anchors
    );
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html")
}

async fn mount_page(server: &MockServer, route: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(&server.uri(), links))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_target_one_click_away() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/about", "/std-testing"]).await;
    mount_page(&server, "/about", &[]).await;
    mount_page(&server, "/std-testing", &["/"]).await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(5));
    let request = NavigationRequest::new(base.clone(), vec![format!("{}/std-testing", base)]);

    let outcome = search.run(&request).await;

    assert_eq!(outcome.result.clicks, Some(1));
    assert_eq!(
        outcome.result.trace,
        vec![base.clone(), format!("{}/std-testing", base)]
    );
    assert_eq!(outcome.final_state, SearchState::Found);
}

#[tokio::test]
async fn test_target_two_clicks_away() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/services", "/contact"]).await;
    mount_page(&server, "/services", &["/services/testing", "/contact"]).await;
    mount_page(&server, "/contact", &[]).await;
    mount_page(&server, "/services/testing", &[]).await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(5));
    let request =
        NavigationRequest::new(base.clone(), vec![format!("{}/services/testing", base)]);

    let outcome = search.run(&request).await;

    assert_eq!(outcome.result.clicks, Some(2));
    assert_eq!(
        outcome.result.trace,
        vec![
            base.clone(),
            format!("{}/services", base),
            format!("{}/services/testing", base)
        ]
    );
    assert_eq!(outcome.stats.render_failures, 0);
}

#[tokio::test]
async fn test_redirected_target_matches_direct_link() {
    let server = MockServer::start().await;
    let base = server.uri();

    // The target was recorded under an old URL that now redirects.
    let location = format!("{}/health", base);
    Mock::given(method("GET"))
        .and(path("/old-health"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&server)
        .await;
    mount_page(&server, "/", &["/health"]).await;
    mount_page(&server, "/health", &[]).await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(3));
    let request = NavigationRequest::new(base.clone(), vec![format!("{}/old-health", base)]);

    let outcome = search.run(&request).await;

    assert_eq!(outcome.result.clicks, Some(1));
    assert_eq!(
        outcome.result.trace,
        vec![base.clone(), format!("{}/health", base)]
    );
}

#[tokio::test]
async fn test_dead_links_do_not_stop_search() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/gone", "/resources"]).await;
    mount_page(&server, "/resources", &["/resources/clinic"]).await;
    mount_page(&server, "/resources/clinic", &[]).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(5));
    let request =
        NavigationRequest::new(base.clone(), vec![format!("{}/resources/clinic", base)]);

    let outcome = search.run(&request).await;

    assert_eq!(outcome.result.clicks, Some(2));
    assert_eq!(outcome.stats.render_failures, 1);
}

#[tokio::test]
async fn test_target_beyond_threshold_is_not_built() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/one"]).await;
    mount_page(&server, "/one", &["/two"]).await;
    mount_page(&server, "/two", &["/three"]).await;

    // Rendered once while preparing targets, never as a level-3 node.
    Mock::given(method("GET"))
        .and(path("/three"))
        .respond_with(html_page(&base, &[]))
        .expect(1)
        .mount(&server)
        .await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(2));
    let request = NavigationRequest::new(base.clone(), vec![format!("{}/three", base)]);

    let outcome = search.run(&request).await;

    assert_eq!(outcome.result.clicks, None);
    assert_eq!(outcome.result.clicks_or_sentinel(), -1);
    assert!(outcome.result.trace.is_empty());
    assert_eq!(outcome.stats.nodes_built, 3);
}

#[tokio::test]
async fn test_robots_disallowed_target_is_unreachable() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/", &["/private/records"]).await;

    Mock::given(method("GET"))
        .and(path("/private/records"))
        .respond_with(html_page(&base, &[]))
        .expect(0)
        .mount(&server)
        .await;

    let renderer = create_renderer(true);
    let search = NavigationSearch::new(&renderer, navigation(3));
    let request =
        NavigationRequest::new(base.clone(), vec![format!("{}/private/records", base)]);

    let outcome = search.run(&request).await;

    assert!(!outcome.result.is_found());
    // Denied once while preparing targets; the node reuses that outcome.
    assert_eq!(outcome.stats.renders, 2);
    assert_eq!(outcome.stats.render_failures, 1);
    assert_eq!(outcome.stats.nodes_built, 2);
}

#[tokio::test]
async fn test_off_site_and_asset_links_ignored() {
    let server = MockServer::start().await;
    let base = server.uri();

    let body = format!(
        r##"<html><body>
        <a href="https://elsewhere.example.org/target">External</a>
        <a href="{base}/brochure.pdf">Brochure</a>
        <a href="{base}/map.png">Map</a>
        <a href="mailto:office@example.edu">Mail</a>
        <a href="#main">Skip</a>
        </body></html>"##,
        base = base
    );
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(3));
    let request = NavigationRequest::new(base.clone(), vec![format!("{}/missing", base)]);

    let outcome = search.run(&request).await;

    assert!(!outcome.result.is_found());
    assert_eq!(outcome.stats.nodes_built, 1);
    assert_eq!(outcome.final_state, SearchState::NotFound);
}

#[tokio::test]
async fn test_document_targets_make_no_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/report.pdf"]).await;

    let renderer = create_renderer(false);
    let search = NavigationSearch::new(&renderer, navigation(3));
    let request = NavigationRequest::new(
        base.clone(),
        vec![format!("{}/report.PDF", base), format!("{}/form.docx", base)],
    );

    let outcome = search.run(&request).await;

    assert!(!outcome.result.is_found());
    assert_eq!(outcome.stats.renders, 0);
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
