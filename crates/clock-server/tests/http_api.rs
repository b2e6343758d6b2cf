//! Integration tests for the HTTP interface.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` over a
//! real [`JsonFileStore`] in a temp directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use clock_server::infrastructure::store::TEMP_FILE_NAME;
use clock_server::infrastructure::{router, JsonFileStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestServer {
    dir: PathBuf,
    app: Router,
}

impl TestServer {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("clock_http_test_{}", Uuid::new_v4()));
        let store = JsonFileStore::new(&dir).with_version("2.1.0");
        Self {
            dir,
            app: router(Arc::new(store)),
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    async fn get_config(&self) -> Value {
        let (status, _, body) = self.get("/config").await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_raw(&self, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::post("/writeConfig")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[tokio::test]
async fn test_get_config_creates_defaults_on_first_access() {
    // Arrange
    let server = TestServer::new();

    // Act
    let (status, headers, body) = server.get("/config").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["deviceName"], json!("Test Clock"));
    assert_eq!(doc["version"], json!("2.1.0"));
    assert!(server.dir.join("config.json").exists());
}

#[tokio::test]
async fn test_repeated_get_returns_identical_document() {
    let server = TestServer::new();

    let first = server.get_config().await;
    let second = server.get_config().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_write_config_returns_empty_200_and_merges() {
    // Arrange
    let server = TestServer::new();
    let before = server.get_config().await;

    // Act
    let (status, body) = server
        .post_raw(r#"{ "deviceName": "Bedroom", "brightness": 7 }"#)
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    let after = server.get_config().await;
    assert_eq!(after["deviceName"], json!("Bedroom"));
    assert_eq!(after["brightness"], json!(7));
    assert_eq!(after["alarmTime"], before["alarmTime"]);
    assert_eq!(after["dayColour"], before["dayColour"]);
    assert_eq!(after["version"], json!("2.1.0"));
}

#[tokio::test]
async fn test_write_config_cannot_change_version() {
    let server = TestServer::new();
    server.get_config().await;

    let (status, _) = server.post_raw(r#"{ "version": "0.0.1" }"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.get_config().await["version"], json!("2.1.0"));
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let server = TestServer::new();

    let (status, _) = server.post_raw("[1, 2, 3]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let server = TestServer::new();

    let (status, _) = server.post_raw("{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_store_yields_500() {
    // Arrange
    let server = TestServer::new();
    std::fs::create_dir_all(&server.dir).unwrap();
    std::fs::write(server.dir.join("config.json"), "{ truncated").unwrap();

    // Act
    let (get_status, _, _) = server.get("/config").await;
    let (post_status, _) = server.post_raw(r#"{ "brightness": 2 }"#).await;

    // Assert
    assert_eq!(get_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(post_status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_write_before_any_read_yields_500() {
    // Arrange: nothing has created the document yet
    let server = TestServer::new();

    // Act
    let (status, _) = server.post_raw(r#"{ "deviceName": "X" }"#).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!server.dir.join("config.json").exists());
}

#[tokio::test]
async fn test_failed_persist_yields_500_and_keeps_document() {
    // Arrange: block the temp file path with a directory
    let server = TestServer::new();
    let before = server.get_config().await;
    std::fs::create_dir_all(server.dir.join(TEMP_FILE_NAME)).unwrap();

    // Act
    let (status, _) = server.post_raw(r#"{ "brightness": 2 }"#).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(server.get_config().await, before);
}

#[tokio::test]
async fn test_root_redirects_to_home_page() {
    let server = TestServer::new();

    let (status, headers, _) = server.get("/").await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "/home.html");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = TestServer::new();

    let (status, _, _) = server.get("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
