//! Validate, submit and classify one synthesis.

use bytes::Bytes;

use super::base::{SpeechError, SpeechService, SynthesisRequest};

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Text exceeds maximum length of {max} characters")]
    TextTooLong { max: usize, actual: usize },
    /// The backend rejected the call or could not be reached.
    #[error("Speech service call failed")]
    Remote(#[source] SpeechError),
    #[error("Unexpected synthesis failure")]
    Unexpected(#[source] SpeechError),
}

#[derive(Debug, Clone, Copy)]
pub struct SynthesisPipeline {
    max_text_length: usize,
}

impl SynthesisPipeline {
    pub fn new(max_text_length: usize) -> Self {
        Self { max_text_length }
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Length check only, counted in characters.
    pub fn validate(&self, request: &SynthesisRequest) -> Result<(), SynthesisError> {
        let actual = request.text.chars().count();
        if actual > self.max_text_length {
            return Err(SynthesisError::TextTooLong {
                max: self.max_text_length,
                actual,
            });
        }
        Ok(())
    }

    /// Raw audio for `request`. Recording it in history is up to the caller.
    pub async fn synthesize(
        &self,
        client: &dyn SpeechService,
        request: &SynthesisRequest,
    ) -> Result<Bytes, SynthesisError> {
        self.validate(request)?;

        match client.synthesize_speech(request).await {
            Ok(audio) => {
                tracing::debug!(
                    voice = %request.voice_name,
                    bytes = audio.len(),
                    "Synthesized speech"
                );
                Ok(audio)
            }
            Err(e) if e.is_remote() => {
                tracing::error!(error = %e, voice = %request.voice_name, "Speech service error");
                Err(SynthesisError::Remote(e))
            }
            Err(e) => {
                tracing::error!(error = %e, "Unexpected error during synthesis");
                Err(SynthesisError::Unexpected(e))
            }
        }
    }
}
