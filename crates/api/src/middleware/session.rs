//! Session authentication middleware.
//!
//! Mutating request routes are gated behind a live SPOC session token,
//! with a fixed-token escape hatch for development setups.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Header carrying a SPOC session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Header carrying the fixed development access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// How a mutating request was authorized.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub spoc_id: Option<String>,
    pub method: AuthMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Session,
    TestToken,
}

/// Middleware that requires a live session token.
///
/// Accepts either a token from the session store (not expired) or, when
/// configured, the fixed test access token. The resolved
/// [`SessionContext`] is stored in request extensions for downstream
/// handlers.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = header_value(&req, SESSION_TOKEN_HEADER) {
        if let Some(session) = state.sessions.validate(&token).await {
            req.extensions_mut().insert(SessionContext {
                spoc_id: session.spoc_id,
                method: AuthMethod::Session,
            });
            return next.run(req).await;
        }
    }

    let test_token = &state.config.security.test_access_token;
    if !test_token.is_empty() {
        if let Some(provided) = header_value(&req, ACCESS_TOKEN_HEADER) {
            if provided == *test_token {
                req.extensions_mut().insert(SessionContext {
                    spoc_id: None,
                    method: AuthMethod::TestToken,
                });
                return next.run(req).await;
            }
        }
    }

    ApiError::Forbidden("Missing or expired session token".to_string()).into_response()
}

fn header_value(req: &Request<Body>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
