mod common;

use bitlie::domain::entities::Visitor;
use common::{TEST_TOKEN, TestApp};
use serde_json::Value;

fn visitor(ip: Option<&str>, platform: Option<&str>) -> Visitor {
    Visitor {
        ip_address: ip.map(str::to_string),
        platform: platform.map(str::to_string),
        ..Visitor::default()
    }
}

#[tokio::test]
async fn test_list_clicks() {
    let app = TestApp::new().await;
    let link = app.create_link("A", "a", "https://example.com").await;
    app.create_click(&link.id, visitor(Some("203.0.113.1"), None))
        .await;

    let response = app
        .server
        .get("/api/clicks")
        .authorization_bearer(TEST_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Clicks retrieved successfully");
    assert_eq!(body["data"][0]["ipAddress"], "203.0.113.1");
    assert!(body["data"][0]["userAgent"].is_null());
    assert!(body["data"][0].get("link").is_none());
}

#[tokio::test]
async fn test_list_clicks_with_links() {
    let app = TestApp::new().await;
    let link = app.create_link("A", "a", "https://example.com").await;
    app.create_click(&link.id, Visitor::default()).await;

    let response = app
        .server
        .get("/api/clicks")
        .authorization_bearer(TEST_TOKEN)
        .add_query_param("with_links", "1")
        .await;

    let body: Value = response.json();
    assert_eq!(body["data"][0]["link"]["alias"], "a");
}

#[tokio::test]
async fn test_list_clicks_nulls_sort_last_ascending() {
    let app = TestApp::new().await;
    let link = app.create_link("A", "a", "https://example.com").await;
    app.create_click(&link.id, visitor(None, None)).await;
    app.create_click(&link.id, visitor(None, Some("macOS"))).await;
    app.create_click(&link.id, visitor(None, Some("Android"))).await;

    let platforms = |order: &'static str| {
        let server = &app.server;
        async move {
            let body: Value = server
                .get("/api/clicks")
                .authorization_bearer(TEST_TOKEN)
                .add_query_param("sort_by", "platform")
                .add_query_param("order", order)
                .await
                .json();
            body["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c["platform"].as_str().map(str::to_string))
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(
        platforms("asc").await,
        vec![Some("Android".to_string()), Some("macOS".to_string()), None]
    );
    assert_eq!(
        platforms("desc").await,
        vec![None, Some("macOS".to_string()), Some("Android".to_string())]
    );
}

#[tokio::test]
async fn test_list_clicks_limit() {
    let app = TestApp::new().await;
    let link = app.create_link("A", "a", "https://example.com").await;
    for _ in 0..3 {
        app.create_click(&link.id, Visitor::default()).await;
    }

    let response = app
        .server
        .get("/api/clicks")
        .authorization_bearer(TEST_TOKEN)
        .add_query_param("limit", "2")
        .await;

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_clicks_limit_out_of_range() {
    let app = TestApp::new().await;

    for limit in ["0", "1001", "abc"] {
        let response = app
            .server
            .get("/api/clicks")
            .authorization_bearer(TEST_TOKEN)
            .add_query_param("limit", limit)
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["path"], "limit");
    }
}

#[tokio::test]
async fn test_delete_click() {
    let app = TestApp::new().await;
    let link = app.create_link("A", "a", "https://example.com").await;
    let click = app.create_click(&link.id, Visitor::default()).await;

    let response = app
        .server
        .delete(&format!("/api/clicks/{}", click.id))
        .authorization_bearer(TEST_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Click deleted successfully");
    assert_eq!(app.click_count().await, 0);
    assert_eq!(app.link_count().await, 1);
}

#[tokio::test]
async fn test_delete_click_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .delete("/api/clicks/missing")
        .authorization_bearer(TEST_TOKEN)
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["message"], "Click not found");
}
