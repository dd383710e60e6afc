mod common;

use common::{PEER_ADDR, TestApp};

#[tokio::test]
async fn test_redirect_success() {
    let app = TestApp::new().await;
    app.create_link("Example", "example", "https://example.com/target")
        .await;

    let response = app.server.get("/example").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/missing").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Link not found");
    assert_eq!(app.click_count().await, 0);
}

#[tokio::test]
async fn test_redirect_records_click() {
    let app = TestApp::new().await;
    let link = app.create_link("Track", "track", "https://example.com").await;

    let response = app
        .server
        .get("/track")
        .add_header("User-Agent", "Mozilla/5.0")
        .add_header("Referer", "https://google.com")
        .add_header("Sec-CH-UA-Platform", "\"Windows\"")
        .await;

    assert_eq!(response.status_code(), 301);

    let clicks = app.clicks().await;
    assert_eq!(clicks.len(), 1);

    let click = &clicks[0];
    assert_eq!(click.link_id, link.id);
    assert_eq!(click.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(click.referer.as_deref(), Some("https://google.com"));
    assert_eq!(click.platform.as_deref(), Some("Windows"));
}

#[tokio::test]
async fn test_redirect_uses_peer_address_without_forwarding() {
    let app = TestApp::new().await;
    app.create_link("Peer", "peer", "https://example.com").await;

    app.server.get("/peer").await;

    let clicks = app.clicks().await;
    let peer_ip = PEER_ADDR.split(':').next().unwrap();
    assert_eq!(clicks[0].ip_address.as_deref(), Some(peer_ip));
    assert!(clicks[0].user_agent.is_none());
    assert!(clicks[0].referer.is_none());
    assert!(clicks[0].platform.is_none());
}

#[tokio::test]
async fn test_redirect_prefers_forwarded_for() {
    let app = TestApp::new().await;
    app.create_link("Proxy", "proxy", "https://example.com").await;

    app.server
        .get("/proxy")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .await;

    let clicks = app.clicks().await;
    assert_eq!(clicks[0].ip_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_redirect_no_click_flag() {
    let app = TestApp::new().await;
    app.create_link("Quiet", "quiet", "https://example.com").await;

    let response = app.server.get("/quiet").add_query_param("nc", "1").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(app.click_count().await, 0);

    let response = app.server.get("/quiet").add_query_param("nc", "0").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(app.click_count().await, 1);
}

#[tokio::test]
async fn test_redirect_rejects_bad_no_click_flag() {
    let app = TestApp::new().await;
    app.create_link("Quiet", "quiet", "https://example.com").await;

    let response = app.server.get("/quiet").add_query_param("nc", "yes").await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["errors"][0]["path"], "nc");
    assert_eq!(app.click_count().await, 0);
}

#[tokio::test]
async fn test_redirect_alias_is_case_sensitive() {
    let app = TestApp::new().await;
    app.create_link("Case", "Case", "https://example.com").await;

    app.server.get("/case").await.assert_status_not_found();
    assert_eq!(app.server.get("/Case").await.status_code(), 301);
}

#[tokio::test]
async fn test_redirect_encodes_non_ascii_location() {
    let app = TestApp::new().await;
    app.create_link("Unicode", "uni", "https://example.com/caf\u{e9}")
        .await;

    let response = app.server.get("/uni").await;

    assert_eq!(response.header("location"), "https://example.com/caf%C3%A9");
}
