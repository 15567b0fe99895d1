use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::core::credentials::ClientId;

/// Errors reported by a remote speech service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpeechError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Remote service error ({status}): {message}")]
    Remote { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl SpeechError {
    /// Whether the backend (or the path to it) rejected or failed the call,
    /// as opposed to us failing to make sense of its answer.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::Remote { .. } | Self::Network(_)
        )
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Remote {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Network(e.to_string())
        }
    }
}

pub type SpeechResult<T> = Result<T, SpeechError>;

/// SSML gender reported for (or requested from) a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    Male,
    Female,
    #[default]
    Neutral,
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    Unspecified,
}

impl VoiceGender {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Neutral => "NEUTRAL",
            Self::Unspecified => "SSML_VOICE_GENDER_UNSPECIFIED",
        }
    }

    /// Parse the API spelling, anything unknown is `Unspecified`.
    pub fn from_api(s: &str) -> Self {
        match s {
            "MALE" => Self::Male,
            "FEMALE" => Self::Female,
            "NEUTRAL" => Self::Neutral,
            _ => Self::Unspecified,
        }
    }
}

/// Output audio encoding. Only MP3 is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
}

impl AudioEncoding {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mp3",
        }
    }
}

/// A synthesis voice as reported by the remote service.
///
/// Voices that support several languages are listed once per language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub language_code: String,
    pub gender: VoiceGender,
}

/// One request to the remote synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_name: String,
    pub language_code: String,
    pub speaking_rate: f32,
    pub gender: VoiceGender,
    pub encoding: AudioEncoding,
}

impl SynthesisRequest {
    /// Build a request with neutral gender selection and MP3 output.
    pub fn new(
        text: impl Into<String>,
        voice_name: impl Into<String>,
        language_code: impl Into<String>,
        speaking_rate: f32,
    ) -> Self {
        Self {
            text: text.into(),
            voice_name: voice_name.into(),
            language_code: language_code.into(),
            speaking_rate,
            gender: VoiceGender::Neutral,
            encoding: AudioEncoding::Mp3,
        }
    }
}

/// Narrow capability interface over the remote speech backend.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Identity of the credential this client was built from.
    fn client_id(&self) -> ClientId;

    async fn list_voices(&self) -> SpeechResult<Vec<Voice>>;

    async fn synthesize_speech(&self, request: &SynthesisRequest) -> SpeechResult<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_gender_api_strings() {
        for gender in [
            VoiceGender::Male,
            VoiceGender::Female,
            VoiceGender::Neutral,
            VoiceGender::Unspecified,
        ] {
            assert_eq!(VoiceGender::from_api(gender.as_str()), gender);
        }
        assert_eq!(VoiceGender::from_api("something"), VoiceGender::Unspecified);
    }

    #[test]
    fn test_voice_gender_serde_matches_api() {
        assert_eq!(
            serde_json::to_string(&VoiceGender::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
        let parsed: VoiceGender = serde_json::from_str("\"SSML_VOICE_GENDER_UNSPECIFIED\"").unwrap();
        assert_eq!(parsed, VoiceGender::Unspecified);
    }

    #[test]
    fn test_request_defaults_to_neutral_mp3() {
        let request = SynthesisRequest::new("hello", "en-US-Standard-A", "en-US", 1.0);
        assert_eq!(request.gender, VoiceGender::Neutral);
        assert_eq!(request.encoding, AudioEncoding::Mp3);
        assert_eq!(request.encoding.mime_type(), "audio/mp3");
    }

    #[test]
    fn test_remote_classification() {
        assert!(SpeechError::Auth("revoked".into()).is_remote());
        assert!(SpeechError::Network("reset".into()).is_remote());
        assert!(
            SpeechError::Remote {
                status: 403,
                message: "denied".into()
            }
            .is_remote()
        );
        assert!(!SpeechError::Decode("bad base64".into()).is_remote());
    }
}
