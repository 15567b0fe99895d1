//! Google Cloud plumbing shared by the Google speech client.

mod auth;

pub use auth::{GOOGLE_CLOUD_PLATFORM_SCOPE, GoogleAuthClient, TokenProvider};
