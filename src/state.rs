//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::cache::VoiceCatalogCache;
use crate::core::credentials::CredentialStore;
use crate::core::rate_limit::RateLimiter;
use crate::core::session::SessionRegistry;
use crate::core::tts::{ClientConnector, ClientFactory, GoogleConnector, SynthesisPipeline};

pub struct AppState {
    pub config: ServerConfig,
    pub clients: ClientFactory,
    pub voice_cache: VoiceCatalogCache,
    pub sessions: SessionRegistry,
    pub pipeline: SynthesisPipeline,
}

impl AppState {
    /// State backed by Google Cloud TTS at the configured base URL.
    pub async fn new(config: ServerConfig) -> std::io::Result<Arc<Self>> {
        let connector = Arc::new(GoogleConnector::new(config.google_tts_base_url.clone()));
        Self::with_connector(config, connector).await
    }

    /// State with a custom client connector.
    pub async fn with_connector(
        config: ServerConfig,
        connector: Arc<dyn ClientConnector>,
    ) -> std::io::Result<Arc<Self>> {
        let store = CredentialStore::open(&config.credentials_dir).await?;

        let limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window());

        Ok(Arc::new(Self {
            clients: ClientFactory::new(store, connector, config.voice_cache_capacity),
            voice_cache: VoiceCatalogCache::new(config.voice_cache_capacity, config.cache_ttl()),
            sessions: SessionRegistry::new(
                config.session_capacity,
                config.session_idle_timeout(),
                limiter,
            ),
            pipeline: SynthesisPipeline::new(config.max_text_length),
            config,
        }))
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.clients.store()
    }
}
