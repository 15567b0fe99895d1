pub mod cache;
pub mod credentials;
pub mod history;
pub mod identity;
pub mod languages;
pub mod providers;
pub mod rate_limit;
pub mod session;
pub mod tts;

// Re-export commonly used types for convenience
pub use cache::{VoiceCatalogCache, VoiceListing};
pub use credentials::{ClientId, CredentialError, CredentialStore, ServiceAccountKey};
pub use history::{HistoryEntry, HistoryLog};
pub use identity::UserIdentity;
pub use rate_limit::{RateLimiter, RateWindow};
pub use session::{SessionHandle, SessionRegistry};
pub use tts::{
    ClientConnector, ClientFactory, GoogleConnector, SpeechError, SpeechResult, SpeechService,
    SynthesisError, SynthesisPipeline, SynthesisRequest, Voice, VoiceGender,
};
