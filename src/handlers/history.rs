use axum::{
    Extension,
    extract::Path,
    response::{Json, Response},
};
use serde::Serialize;

use super::speak::audio_response;
use crate::core::history::HistoryEntry;
use crate::core::session::SessionHandle;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub index: usize,
    pub timestamp: String,
    pub text: String,
    pub language_code: String,
    pub language: String,
    pub voice_name: String,
    pub voice: String,
    pub speed: f32,
    pub audio_size: usize,
}

impl HistoryItem {
    fn new(index: usize, entry: &HistoryEntry) -> Self {
        Self {
            index,
            timestamp: entry.timestamp(),
            text: entry.text.clone(),
            language_code: entry.language_code.clone(),
            language: entry.language_name.clone(),
            voice_name: entry.voice_name.clone(),
            voice: entry.voice_display.clone(),
            speed: entry.speed,
            audio_size: entry.audio.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRemoved {
    pub removed: usize,
    pub remaining: usize,
}

fn not_found(index: usize) -> AppError {
    AppError::NotFound(format!("History entry {index} not found"))
}

/// Entries of the caller's session, newest first, without audio.
pub async fn list_history(Extension(session): Extension<SessionHandle>) -> Json<Vec<HistoryItem>> {
    let items = session
        .history_snapshot()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryItem::new(index, entry))
        .collect();
    Json(items)
}

pub async fn history_audio(
    Extension(session): Extension<SessionHandle>,
    Path(index): Path<usize>,
) -> AppResult<Response> {
    let entry = session.history_entry(index).ok_or_else(|| not_found(index))?;
    Ok(audio_response(
        entry.audio,
        &format!("generated_speech_{index}.mp3"),
    ))
}

pub async fn delete_history_entry(
    Extension(session): Extension<SessionHandle>,
    Path(index): Path<usize>,
) -> AppResult<Json<HistoryRemoved>> {
    session.remove_history(index).ok_or_else(|| not_found(index))?;
    Ok(Json(HistoryRemoved {
        removed: index,
        remaining: session.history_len(),
    }))
}
