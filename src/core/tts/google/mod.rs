//! Google Cloud Text-to-Speech provider.

mod provider;

pub use provider::{GOOGLE_TTS_URL, GoogleTTS};
