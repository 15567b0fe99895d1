//! Session middleware
//!
//! Resolves the caller's identity from the `fourier_session` cookie, issuing
//! a fresh one when the cookie is absent or malformed, and injects the
//! matching [`SessionHandle`] as a request extension.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use fourier_gateway::middleware::session_middleware;
//!
//! let app = routes::api::create_api_router()
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         session_middleware,
//!     ));
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::core::identity::UserIdentity;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "fourier_session";

/// Identity carried by the session cookie, if present and well formed.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<UserIdentity> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

fn session_cookie(identity: &UserIdentity, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}={identity}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// Attach the caller's session to the request.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let (identity, issued) = match identity_from_headers(request.headers()) {
        Some(identity) => (identity, false),
        None => (UserIdentity::generate(), true),
    };

    let session = state.sessions.get_or_create(identity).await;
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;

    if issued {
        tracing::debug!(user_id = %identity, live_sessions = state.sessions.session_count(), "Issued session cookie");
        if let Some(cookie) = session_cookie(&identity, state.config.is_tls_enabled()) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}
