//! Server Startup Tests
//!
//! Tests for server lifecycle, configuration loading, and startup behavior.

mod fixtures;

use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{body::Body, http::Request, http::StatusCode};
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tower::util::ServiceExt;

use fourier_gateway::{ServerConfig, routes, state::AppState};

use fixtures::test_config;

/// Test that the server starts without any stored credentials
#[tokio::test]
async fn test_minimal_config_boot() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let credentials_dir = config.credentials_dir.clone();
    assert!(!credentials_dir.exists());

    let app_state = AppState::new(config).await.unwrap();
    assert!(credentials_dir.is_dir());
    assert_eq!(app_state.credentials().dir(), credentials_dir);

    let app = routes::create_app_router(app_state);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Test that startup fails when the credentials directory cannot be created
#[tokio::test]
async fn test_unusable_credentials_dir_fails_startup() {
    let file = NamedTempFile::new().unwrap();
    let mut config = test_config(file.path());
    // A path below a regular file can never become a directory
    config.credentials_dir = file.path().join("nested");

    assert!(AppState::new(config).await.is_err());
}

/// Test that every API route is mounted
#[tokio::test]
async fn test_full_api_routes_available() {
    let dir = TempDir::new().unwrap();
    let app = routes::create_app_router(AppState::new(test_config(dir.path())).await.unwrap());

    for (method, uri, expected) in [
        ("GET", "/session", StatusCode::OK),
        ("GET", "/credentials", StatusCode::OK),
        ("GET", "/history", StatusCode::OK),
        ("GET", "/voices", StatusCode::PRECONDITION_FAILED),
        ("GET", "/history/0/audio", StatusCode::NOT_FOUND),
        ("DELETE", "/history/0", StatusCode::NOT_FOUND),
        ("DELETE", "/session", StatusCode::OK),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected, "{method} {uri}");
    }

    let request = Request::builder()
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test that configured limits reach the shared state
#[tokio::test]
async fn test_limit_configurations() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.max_text_length = 200;
    config.rate_limit_requests = 5;
    config.rate_limit_window_seconds = 30;

    let app_state = AppState::new(config).await.unwrap();
    assert_eq!(app_state.pipeline.max_text_length(), 200);
    assert_eq!(app_state.sessions.limiter().max_requests(), 5);
    assert_eq!(
        app_state.sessions.limiter().window(),
        Duration::from_secs(30)
    );
    assert_eq!(app_state.voice_cache.declared_ttl(), Duration::from_secs(3600));
}

/// Test that CORS configuration is carried in the state
#[tokio::test]
async fn test_cors_configurations() {
    let dir = TempDir::new().unwrap();

    let mut config = test_config(dir.path());
    config.cors_allowed_origins = Some("http://localhost:3000,http://localhost:8080".to_string());
    let app_state = AppState::new(config).await.unwrap();
    assert_eq!(
        app_state.config.cors_allowed_origins.as_deref(),
        Some("http://localhost:3000,http://localhost:8080")
    );
}

/// Test that a YAML configuration file boots a working server
#[tokio::test]
#[serial]
async fn test_yaml_config_boot() {
    let dir = TempDir::new().unwrap();
    let credentials_dir = dir.path().join("accounts");

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
server:
  host: "127.0.0.1"
  port: 0
storage:
  credentials_dir: "{}"
limits:
  max_text_length: 1000
  rate_limit_requests: 3
  rate_limit_window_seconds: 15
security:
  rate_limit_requests_per_second: 100000
"#,
        credentials_dir.display()
    )
    .unwrap();

    let config = ServerConfig::from_file(&file.path().to_path_buf()).unwrap();
    assert_eq!(config.address(), "127.0.0.1:0");
    assert_eq!(config.max_text_length, 1000);
    assert_eq!(config.rate_limit_requests, 3);
    assert_eq!(config.rate_limit_window_seconds, 15);

    let app_state = AppState::new(config).await.unwrap();
    assert!(credentials_dir.is_dir());

    let request = Request::builder().uri("/session").body(Body::empty()).unwrap();
    let response = routes::create_app_router(app_state)
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Test that an invalid YAML value is rejected before startup
#[tokio::test]
#[serial]
async fn test_invalid_yaml_config_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
limits:
  rate_limit_requests: 0
"#
    )
    .unwrap();

    assert!(ServerConfig::from_file(&file.path().to_path_buf()).is_err());
}

/// Test that the server answers over a real socket
#[tokio::test]
async fn test_server_serves_over_tcp() {
    let dir = TempDir::new().unwrap();
    let app = routes::create_app_router(AppState::new(test_config(dir.path())).await.unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let response = timeout(
        Duration::from_secs(5),
        reqwest::get(format!("http://{addr}/")),
    )
    .await
    .expect("server did not answer in time")
    .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    server.abort();
}
