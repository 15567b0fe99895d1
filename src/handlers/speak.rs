use axum::{
    Extension,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

use crate::core::history::HistoryEntry;
use crate::core::languages::{format_voice_name, language_display_name};
use crate::core::session::SessionHandle;
use crate::core::tts::{AudioEncoding, SynthesisRequest};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;
pub const DOWNLOAD_FILE_NAME: &str = "generated_speech.mp3";

fn default_speed() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    pub language_code: String,
    pub voice_name: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

impl SpeakRequest {
    fn validate(&self) -> AppResult<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter some text to convert to speech.".to_string(),
            ));
        }
        if self.voice_name.trim().is_empty() || self.language_code.trim().is_empty() {
            return Err(AppError::Validation(
                "Both language_code and voice_name are required.".to_string(),
            ));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(AppError::Validation(format!(
                "Speed must be between {MIN_SPEED} and {MAX_SPEED}."
            )));
        }
        Ok(())
    }
}

/// MP3 download response with the given file name.
pub fn audio_response(audio: Bytes, file_name: &str) -> Response {
    let mut response = (StatusCode::OK, audio).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(AudioEncoding::Mp3.mime_type()),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    response
}

/// Synthesize speech with the caller's credential and record it in history.
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    request.validate()?;

    let identity = session.identity();
    let client = state
        .clients
        .get_client(&identity)
        .await
        .ok_or(AppError::NoCredential)?;

    let limiter = state.sessions.limiter();
    if !session.check_and_consume(limiter) {
        tracing::warn!(user_id = %identity, "Synthesis rate limit exceeded");
        return Err(AppError::RateLimited {
            retry_after: limiter.window(),
        });
    }

    let synthesis = SynthesisRequest::new(
        request.text,
        request.voice_name,
        request.language_code,
        request.speed,
    );
    let audio = state.pipeline.synthesize(client.as_ref(), &synthesis).await?;

    session.record(HistoryEntry::new(
        &synthesis,
        language_display_name(&synthesis.language_code),
        format_voice_name(&synthesis.voice_name),
        audio.clone(),
    ));
    tracing::info!(
        user_id = %identity,
        voice = %synthesis.voice_name,
        bytes = audio.len(),
        "Speech generated"
    );

    Ok(audio_response(audio, DOWNLOAD_FILE_NAME))
}
