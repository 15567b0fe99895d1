//! Process-wide memo of voice catalogs, keyed by client identity.
//!
//! The catalog of a credential rarely changes, so it is fetched once per
//! distinct client and shared by every session using that credential. The
//! configured TTL is carried for reporting only and is not enforced.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::core::credentials::ClientId;
use crate::core::tts::{SpeechError, SpeechService, Voice};

/// Voices for a client plus the error that emptied the list, if any.
#[derive(Debug, Clone)]
pub struct VoiceListing {
    pub voices: Arc<Vec<Voice>>,
    pub error: Option<SpeechError>,
}

impl VoiceListing {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

pub struct VoiceCatalogCache {
    catalogs: Cache<ClientId, Arc<Vec<Voice>>>,
    declared_ttl: Duration,
}

impl VoiceCatalogCache {
    pub fn new(capacity: u64, declared_ttl: Duration) -> Self {
        Self {
            catalogs: Cache::new(capacity),
            declared_ttl,
        }
    }

    pub fn declared_ttl(&self) -> Duration {
        self.declared_ttl
    }

    /// Voices available to `client`.
    ///
    /// A remote failure yields an empty listing carrying the error; failures
    /// are not memoized, so the next call retries.
    pub async fn list_voices(&self, client: &dyn SpeechService) -> VoiceListing {
        let client_id = client.client_id();
        let fetched = self
            .catalogs
            .try_get_with(client_id, async {
                let voices = client.list_voices().await?;
                tracing::debug!(client_id = %client_id, count = voices.len(), "Fetched voice catalog");
                Ok::<_, SpeechError>(Arc::new(voices))
            })
            .await;

        match fetched {
            Ok(voices) => VoiceListing {
                voices,
                error: None,
            },
            Err(e) => {
                tracing::error!(client_id = %client_id, error = %e, "Error fetching voices");
                VoiceListing {
                    voices: Arc::new(Vec::new()),
                    error: Some((*e).clone()),
                }
            }
        }
    }

    /// Drop the memoized catalog for `client_id`.
    pub async fn invalidate(&self, client_id: &ClientId) {
        self.catalogs.invalidate(client_id).await;
    }
}
