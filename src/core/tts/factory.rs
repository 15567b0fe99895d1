//! Builds authenticated speech clients from stored credentials.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use super::base::{SpeechResult, SpeechService};
use super::google::GoogleTTS;
use crate::core::credentials::{ClientId, CredentialStore, ServiceAccountKey};
use crate::core::identity::UserIdentity;
use crate::core::providers::google::{GOOGLE_CLOUD_PLATFORM_SCOPE, GoogleAuthClient, TokenProvider};

/// Turns a service-account key into a ready-to-use speech client.
#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(&self, key: &ServiceAccountKey) -> SpeechResult<Arc<dyn SpeechService>>;
}

/// Connector producing Google Cloud TTS clients.
pub struct GoogleConnector {
    base_url: String,
    http: reqwest::Client,
}

impl GoogleConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ClientConnector for GoogleConnector {
    /// Fails unless the key can actually mint an access token.
    async fn connect(&self, key: &ServiceAccountKey) -> SpeechResult<Arc<dyn SpeechService>> {
        let auth = GoogleAuthClient::new(key, &[GOOGLE_CLOUD_PLATFORM_SCOPE])?;
        auth.get_token().await?;

        Ok(Arc::new(GoogleTTS::with_token_provider(
            key.client_id(),
            &self.base_url,
            self.http.clone(),
            Arc::new(auth),
        )))
    }
}

/// A built client together with the exact key it was built from.
#[derive(Clone)]
struct CachedClient {
    key: Arc<ServiceAccountKey>,
    client: Arc<dyn SpeechService>,
}

/// Resolves a user identity to a speech client via the credential store.
///
/// Clients are memoized per [`ClientId`] so a cached OAuth token is reused
/// across requests of the same credential. A memoized client is handed out
/// only when the caller's stored key equals the one it was built from.
pub struct ClientFactory {
    store: CredentialStore,
    connector: Arc<dyn ClientConnector>,
    clients: Cache<ClientId, CachedClient>,
}

impl ClientFactory {
    pub fn new(store: CredentialStore, connector: Arc<dyn ClientConnector>, capacity: u64) -> Self {
        Self {
            store,
            connector,
            clients: Cache::new(capacity),
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Client for `identity`, or `None` when no usable credential is stored.
    ///
    /// Unreadable files and keys the connector rejects are logged and
    /// reported as `None`.
    pub async fn get_client(&self, identity: &UserIdentity) -> Option<Arc<dyn SpeechService>> {
        let key = match self.store.load(identity).await {
            Ok(Some(key)) => key,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(user_id = %identity, error = %e, "Stored service account is unreadable");
                return None;
            }
        };

        let client_id = key.client_id();
        if let Some(cached) = self.clients.get(&client_id).await {
            if *cached.key == key {
                return Some(cached.client);
            }
            tracing::warn!(user_id = %identity, client_id = %client_id, "Cached client belongs to a different key");
        }

        match self.connector.connect(&key).await {
            Ok(client) => {
                let cached = CachedClient {
                    key: Arc::new(key),
                    client: client.clone(),
                };
                self.clients.insert(client_id, cached).await;
                tracing::debug!(user_id = %identity, client_id = %client_id, "Built speech client");
                Some(client)
            }
            Err(e) => {
                tracing::warn!(user_id = %identity, error = %e, "Failed to build speech client");
                None
            }
        }
    }
}
