use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::require_session;
use crate::realtime::EventHub;
use crate::routes::{events, health, requests, spoc};
use crate::services::session::SessionStore;
use persistence::store::RequestStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RequestStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub hub: EventHub,
    pub config: Arc<Config>,
}

/// Assembles the shared application state.
pub fn build_state(
    config: Config,
    store: Arc<dyn RequestStore>,
    sessions: Arc<dyn SessionStore>,
) -> AppState {
    AppState {
        store,
        sessions,
        hub: EventHub::new(),
        config: Arc::new(config),
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Build CORS layer based on configuration
    let cors = if config.security.allowed_origin.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .security
            .allowed_origin
            .parse()
            .into_iter()
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Mutating routes require a live SPOC session (or the configured
    // test access token)
    let mutating_routes = Router::new()
        .route(
            "/api/requests/:id",
            patch(requests::update_request).delete(requests::delete_request),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route(
            "/api/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/api/spoc/unlock", post(spoc::unlock))
        .route("/api/spoc/validate", get(spoc::validate))
        .route("/health", get(health::health_check));

    // The event stream is registered after the timeout layer so
    // subscribers can hold their connection open past the request
    // timeout
    let event_routes = Router::new().route("/api/events", get(events::subscribe));

    Router::new()
        .merge(public_routes)
        .merge(mutating_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .merge(event_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
