use axum::{
    Extension,
    body::Bytes,
    extract::State,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::credentials::REQUIRED_FIELDS;
use crate::core::session::SessionHandle;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn credential_status(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Json<CredentialStatus> {
    Json(CredentialStatus {
        configured: state.credentials().exists(&session.identity()).await,
        message: None,
    })
}

/// Store the request body as the caller's service account file.
///
/// A re-upload replaces the previous file only when the new one is valid,
/// and drops any catalog cached for that key so it is fetched again.
pub async fn upload_credentials(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    body: Bytes,
) -> AppResult<Json<CredentialStatus>> {
    let identity = session.identity();
    if !state.credentials().save(&identity, &body).await {
        return Err(AppError::InvalidCredential(format!(
            "Invalid service account file. It must be a JSON object with: {}",
            REQUIRED_FIELDS.join(", ")
        )));
    }

    if let Ok(Some(key)) = state.credentials().load(&identity).await {
        state.voice_cache.invalidate(&key.client_id()).await;
    }

    Ok(Json(CredentialStatus {
        configured: true,
        message: Some("Service account uploaded successfully"),
    }))
}

pub async fn remove_credentials(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> AppResult<Json<CredentialStatus>> {
    if !state.credentials().remove(&session.identity()).await {
        return Err(AppError::Unexpected);
    }

    Ok(Json(CredentialStatus {
        configured: false,
        message: Some("Service account removed successfully"),
    }))
}
