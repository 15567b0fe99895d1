use std::io;
use std::path::{Path, PathBuf};

use super::{CredentialError, ServiceAccountKey, validate_credential};
use crate::core::identity::UserIdentity;

/// Filesystem store holding one service-account key per user identity.
///
/// Writes are not serialized: two concurrent uploads for the same identity
/// race and the last write wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Open the store, creating the credentials directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "Credential store ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the credential file for `identity`.
    pub fn path_for(&self, identity: &UserIdentity) -> PathBuf {
        self.dir.join(format!("{identity}.json"))
    }

    /// Validate and persist an uploaded key file.
    ///
    /// Returns `false` without touching the disk when the file is not a JSON
    /// object carrying every required field. Any I/O error is also reported
    /// as `false`.
    pub async fn save(&self, identity: &UserIdentity, raw: &[u8]) -> bool {
        match self.try_save(identity, raw).await {
            Ok(()) => {
                tracing::info!(user_id = %identity, "Service account saved");
                true
            }
            Err(e) => {
                tracing::warn!(user_id = %identity, error = %e, "Rejected service account upload");
                false
            }
        }
    }

    async fn try_save(&self, identity: &UserIdentity, raw: &[u8]) -> Result<(), CredentialError> {
        let value = validate_credential(raw)?;
        let serialized = serde_json::to_vec(&value)?;
        tokio::fs::write(self.path_for(identity), serialized).await?;
        Ok(())
    }

    /// Whether a credential file is present for `identity`.
    pub async fn exists(&self, identity: &UserIdentity) -> bool {
        tokio::fs::try_exists(self.path_for(identity))
            .await
            .unwrap_or(false)
    }

    /// Delete the credential for `identity`.
    ///
    /// Removing a credential that does not exist succeeds.
    pub async fn remove(&self, identity: &UserIdentity) -> bool {
        match tokio::fs::remove_file(self.path_for(identity)).await {
            Ok(()) => {
                tracing::info!(user_id = %identity, "Service account removed");
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::error!(user_id = %identity, error = %e, "Failed to remove service account");
                false
            }
        }
    }

    /// Read and parse the stored key, `Ok(None)` when none is stored.
    pub async fn load(
        &self,
        identity: &UserIdentity,
    ) -> Result<Option<ServiceAccountKey>, CredentialError> {
        let raw = match tokio::fs::read(self.path_for(identity)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        ServiceAccountKey::from_slice(&raw).map(Some)
    }
}
