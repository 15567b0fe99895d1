use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::core::tts::SynthesisError;

/// Failure of one API request, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidCredential(String),
    #[error("No service account configured. Please upload a service account JSON file.")]
    NoCredential,
    #[error("Rate limit exceeded. Please wait {} seconds.", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },
    #[error("{0}")]
    NotFound(String),
    /// Detail is logged where it happens, never returned.
    #[error("Speech service request failed. Please check your service account credentials.")]
    RemoteService,
    #[error("An unexpected error occurred. Please try again later.")]
    Unexpected,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidCredential(_) => StatusCode::BAD_REQUEST,
            Self::NoCredential => StatusCode::PRECONDITION_FAILED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RemoteService => StatusCode::BAD_GATEWAY,
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));

        match self {
            Self::RateLimited { retry_after } => (
                status,
                [("retry-after", retry_after.as_secs().to_string())],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}

impl From<SynthesisError> for AppError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::TextTooLong { .. } => Self::Validation(e.to_string()),
            SynthesisError::Remote(_) => Self::RemoteService,
            SynthesisError::Unexpected(_) => Self::Unexpected,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
