//! Service-account credentials and their on-disk store.
//!
//! Every session may upload exactly one Google Cloud service-account key. The
//! key is validated for the fields the OAuth grant needs, then persisted under
//! the credentials directory as `<identity>.json`.

mod store;

pub use store::CredentialStore;

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_128;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fields an uploaded key file must carry to be accepted.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "type",
    "project_id",
    "private_key_id",
    "private_key",
    "client_email",
];

/// Errors raised while validating or reading a credential file.
///
/// These never cross the store boundary as errors: `save` collapses them into
/// `false` and `load` logs them before the factory reports "no client".
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("credential file must contain a JSON object")]
    NotAnObject,
    #[error("credential file is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("credential I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Check an uploaded file and return it as a JSON value ready to persist.
pub fn validate_credential(raw: &[u8]) -> Result<serde_json::Value, CredentialError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let object = value.as_object().ok_or(CredentialError::NotAnObject)?;

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(CredentialError::MissingFields(missing));
    }

    Ok(value)
}

/// Parsed Google Cloud service-account key.
///
/// Secret material is wiped from memory when the key is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_slice(raw: &[u8]) -> Result<Self, CredentialError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Stable identity of the client built from this key.
    ///
    /// Covers the private key itself: two uploads share a client only when
    /// they carry the same secret.
    pub fn client_id(&self) -> ClientId {
        let token_uri = self.token_uri.as_deref().unwrap_or_default();
        let mut s = String::with_capacity(
            self.client_email.len()
                + self.private_key_id.len()
                + self.private_key.len()
                + token_uri.len()
                + 4,
        );
        for part in [
            self.client_email.as_str(),
            self.private_key_id.as_str(),
            self.private_key.as_str(),
            token_uri,
        ] {
            s.push_str(part);
            s.push('\0');
        }
        let id = ClientId(xxh3_128(s.as_bytes()));
        s.zeroize();
        id
    }

    /// JSON document in the shape Google's credential builders expect.
    pub fn to_json(&self) -> Result<serde_json::Value, CredentialError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Fingerprint of a credential, used to key per-client caches.
///
/// Two sessions that upload the same key share one client identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u128);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
