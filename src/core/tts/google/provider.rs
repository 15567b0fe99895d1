//! Google Cloud Text-to-Speech REST client.
//!
//! # API Reference
//!
//! - Voices: `GET {base}/v1/voices`
//! - Synthesis: `POST {base}/v1/text:synthesize`
//! - Auth: OAuth2 bearer token, scope `cloud-platform`
//! - Output: base64 encoded `audioContent`

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::core::credentials::{ClientId, ServiceAccountKey};
use crate::core::providers::google::{GOOGLE_CLOUD_PLATFORM_SCOPE, GoogleAuthClient, TokenProvider};
use crate::core::tts::base::{
    SpeechError, SpeechResult, SpeechService, SynthesisRequest, Voice, VoiceGender,
};

/// Google Cloud Text-to-Speech API base URL
pub const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com";

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct GoogleVoicesResponse {
    voices: Option<Vec<GoogleVoice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    #[serde(default)]
    language_codes: Vec<String>,
    name: String,
    ssml_gender: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

// =============================================================================
// Client
// =============================================================================

/// Authenticated Google Cloud TTS client for one service account.
pub struct GoogleTTS {
    client_id: ClientId,
    base_url: String,
    http: reqwest::Client,
    auth: Arc<dyn TokenProvider>,
}

impl GoogleTTS {
    /// Build a client authenticated with the given service-account key.
    pub fn new(key: &ServiceAccountKey, base_url: &str, http: reqwest::Client) -> SpeechResult<Self> {
        let auth = GoogleAuthClient::new(key, &[GOOGLE_CLOUD_PLATFORM_SCOPE])?;
        Ok(Self::with_token_provider(
            key.client_id(),
            base_url,
            http,
            Arc::new(auth),
        ))
    }

    pub fn with_token_provider(
        client_id: ClientId,
        base_url: &str,
        http: reqwest::Client,
        auth: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            auth,
        }
    }

    async fn check_status(response: reqwest::Response) -> SpeechResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(SpeechError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SpeechService for GoogleTTS {
    fn client_id(&self) -> ClientId {
        self.client_id
    }

    async fn list_voices(&self) -> SpeechResult<Vec<Voice>> {
        let token = self.auth.get_token().await?;

        let response = self
            .http
            .get(format!("{}/v1/voices", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: GoogleVoicesResponse = response.json().await?;

        let voices = body
            .voices
            .unwrap_or_default()
            .into_iter()
            .flat_map(|voice| {
                let gender = voice
                    .ssml_gender
                    .as_deref()
                    .map(VoiceGender::from_api)
                    .unwrap_or_default();
                let name = voice.name;
                voice
                    .language_codes
                    .into_iter()
                    .map(move |language_code| Voice {
                        name: name.clone(),
                        language_code,
                        gender,
                    })
            })
            .collect();

        Ok(voices)
    }

    async fn synthesize_speech(&self, request: &SynthesisRequest) -> SpeechResult<Bytes> {
        let token = self.auth.get_token().await?;

        let body = SynthesizeBody {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelectionParams {
                language_code: &request.language_code,
                name: &request.voice_name,
                ssml_gender: request.gender.as_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: request.encoding.as_str(),
                speaking_rate: request.speaking_rate,
            },
        };

        let response = self
            .http
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: SynthesizeResponse = response.json().await?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(body.audio_content)
            .map_err(|e| SpeechError::Decode(format!("audioContent is not base64: {e}")))?;

        Ok(Bytes::from(audio))
    }
}
