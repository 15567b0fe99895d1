//! Per-session user identity.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque token identifying one browser session.
///
/// Backed by a v4 UUID so that any path derived from it (for example the
/// credential file name) is always a single, well-formed path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserIdentity(Uuid);

impl UserIdentity {
    /// Generate a fresh identity for a new session.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserIdentity {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
