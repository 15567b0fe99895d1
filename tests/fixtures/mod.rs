//! Test Fixtures Module
//!
//! Service account documents and server configurations shared by the
//! integration tests.

// Not every test binary uses every fixture
#![allow(dead_code)]

use std::path::Path;

use fourier_gateway::ServerConfig;
use serde_json::{Value, json};

/// Throwaway 2048-bit RSA key, usable for signing token assertions.
pub const TEST_PRIVATE_KEY: &str = include_str!("service_account_key.pem");

pub const TEST_CLIENT_EMAIL: &str = "tts-tester@demo-project.iam.gserviceaccount.com";

/// A complete service account document pointing at `token_uri`.
pub fn service_account_json(token_uri: &str) -> Value {
    json!({
        "type": "service_account",
        "project_id": "demo-project",
        "private_key_id": "0123456789abcdef",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "1234567890",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": token_uri,
    })
}

/// Same document with a different key id, i.e. a distinct credential.
pub fn rotated_service_account_json(token_uri: &str) -> Value {
    let mut doc = service_account_json(token_uri);
    doc["private_key_id"] = json!("fedcba9876543210");
    doc
}

/// Configuration for tests: credentials under `dir`, per-IP limiting off.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        credentials_dir: dir.join("user_service_accounts"),
        cors_allowed_origins: Some("*".to_string()),
        rate_limit_requests_per_second: 100000, // Disable for tests
        rate_limit_burst_size: 100,
        ..ServerConfig::default()
    }
}
