//! OAuth2 access tokens for Google Cloud service accounts.
//!
//! Wraps `google-cloud-auth` service-account credentials. The library signs
//! tokens with the key's RSA private key and refreshes them in the background,
//! so repeated calls hand out the cached token until it nears expiry.

use async_trait::async_trait;
use google_cloud_auth::credentials::service_account::{AccessSpecifier, Builder};
use google_cloud_auth::credentials::{CacheableResource, Credentials};
use http::{Extensions, header::AUTHORIZATION};

use crate::core::credentials::ServiceAccountKey;
use crate::core::tts::{SpeechError, SpeechResult};

/// Single permission scope needed for Cloud Text-to-Speech.
pub const GOOGLE_CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Source of bearer tokens for outgoing API calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> SpeechResult<String>;
}

/// Token provider backed by a service-account key.
pub struct GoogleAuthClient {
    client_email: String,
    credentials: Credentials,
}

impl GoogleAuthClient {
    /// Prepare a token provider for `key` with the given OAuth scopes.
    ///
    /// Must be called from within a Tokio runtime. An unusable private key
    /// is only detected by the first [`TokenProvider::get_token`] call.
    pub fn new(key: &ServiceAccountKey, scopes: &[&str]) -> SpeechResult<Self> {
        let document = key
            .to_json()
            .map_err(|e| SpeechError::Auth(format!("invalid service account key: {e}")))?;

        let credentials = Builder::new(document)
            .with_access_specifier(AccessSpecifier::from_scopes(scopes.iter().copied()))
            .build()
            .map_err(|e| SpeechError::Auth(format!("invalid service account key: {e}")))?;

        Ok(Self {
            client_email: key.client_email.clone(),
            credentials,
        })
    }
}

#[async_trait]
impl TokenProvider for GoogleAuthClient {
    async fn get_token(&self) -> SpeechResult<String> {
        let headers = match self.credentials.headers(Extensions::new()).await {
            Ok(CacheableResource::New { data, .. }) => data,
            Ok(CacheableResource::NotModified) => {
                return Err(SpeechError::Auth(
                    "credentials returned no authorization header".to_string(),
                ));
            }
            Err(e) => {
                tracing::warn!(client_email = %self.client_email, error = %e, "Failed to obtain Google access token");
                return Err(SpeechError::Auth(e.to_string()));
            }
        };

        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SpeechError::Auth("missing authorization header".to_string()))?;

        Ok(value.strip_prefix("Bearer ").unwrap_or(value).to_string())
    }
}
