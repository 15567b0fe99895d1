mod base;
pub mod factory;
pub mod google;
pub mod pipeline;

pub use base::{
    AudioEncoding, SpeechError, SpeechResult, SpeechService, SynthesisRequest, Voice, VoiceGender,
};
pub use factory::{ClientConnector, ClientFactory, GoogleConnector};
pub use google::{GOOGLE_TTS_URL, GoogleTTS};
pub use pipeline::{SynthesisError, SynthesisPipeline};
