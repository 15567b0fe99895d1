use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{credentials, history, session, speak, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router with session-scoped routes
///
/// Handlers expect a `SessionHandle` extension, so the router must be wrapped
/// in the session middleware (see [`super::create_app_router`]).
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/session",
            get(session::get_session).delete(session::end_session),
        )
        .route(
            "/credentials",
            get(credentials::credential_status)
                .put(credentials::upload_credentials)
                .delete(credentials::remove_credentials),
        )
        .route("/voices", get(voices::list_voices))
        .route("/speak", post(speak::speak_handler))
        .route("/history", get(history::list_history))
        .route("/history/{index}", delete(history::delete_history_entry))
        .route("/history/{index}/audio", get(history::history_audio))
        .layer(TraceLayer::new_for_http())
}
