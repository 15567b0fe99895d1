use axum::{
    Extension,
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::languages::{
    DEFAULT_LANGUAGE, available_languages, default_voice_index, format_voice_display,
    language_display_name, voices_for_language,
};
use crate::core::session::SessionHandle;
use crate::core::tts::VoiceGender;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VoicesQuery {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceOption {
    pub name: String,
    pub display_name: String,
    pub gender: VoiceGender,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub languages: Vec<LanguageOption>,
    pub selected_language: String,
    pub voices: Vec<VoiceOption>,
    /// Index into `voices` of the preselected voice.
    pub default_voice_index: usize,
    /// Set when the catalog could not be fetched and is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Languages offered by the caller's credential and the voices of one of them.
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<VoicesQuery>,
) -> AppResult<Json<VoicesResponse>> {
    let client = state
        .clients
        .get_client(&session.identity())
        .await
        .ok_or(AppError::NoCredential)?;

    let listing = state.voice_cache.list_voices(client.as_ref()).await;
    let warning = listing
        .is_degraded()
        .then(|| AppError::RemoteService.to_string());

    let languages = available_languages(&listing.voices)
        .into_iter()
        .map(|code| LanguageOption {
            code: code.to_string(),
            name: language_display_name(code).to_string(),
        })
        .collect();

    let selected_language = query
        .language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let available = voices_for_language(&listing.voices, &selected_language);
    let default_index = default_voice_index(&available);
    let voices = available
        .into_iter()
        .map(|v| VoiceOption {
            name: v.name.clone(),
            display_name: format_voice_display(v),
            gender: v.gender,
        })
        .collect();

    Ok(Json(VoicesResponse {
        languages,
        selected_language,
        voices,
        default_voice_index: default_index,
        warning,
    }))
}
