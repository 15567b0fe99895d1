use axum::{
    Extension,
    extract::State,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::session::SessionHandle;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub user_id: String,
    pub credential_configured: bool,
    pub history_size: usize,
    pub session_age_seconds: u64,
    pub max_text_length: usize,
    pub rate_limit_requests: u32,
    pub rate_limit_window_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionEnded {
    pub ended: bool,
}

/// Summary of the caller's session and the limits applied to it.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Json<SessionSummary> {
    let identity = session.identity();
    let limiter = state.sessions.limiter();

    Json(SessionSummary {
        user_id: identity.to_string(),
        credential_configured: state.credentials().exists(&identity).await,
        history_size: session.history_len(),
        session_age_seconds: session.age().as_secs(),
        max_text_length: state.pipeline.max_text_length(),
        rate_limit_requests: limiter.max_requests(),
        rate_limit_window_seconds: limiter.window().as_secs(),
    })
}

/// Discard the caller's history and rate window. The stored credential stays.
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Json<SessionEnded> {
    let ended = state.sessions.end(&session.identity()).await;
    Json(SessionEnded { ended })
}
