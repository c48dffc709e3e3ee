//! API routes.

pub mod health;
pub mod heatmap;
pub mod ingest;
pub mod sessions;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::origin::enforce_origin;
use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/api/events", post(ingest::ingest_handler))
        .route("/api/events/heatmap", get(heatmap::heatmap_handler))
        .route("/api/sessions", get(sessions::list_sessions_handler))
        .route(
            "/api/sessions/:session_id",
            get(sessions::session_events_handler),
        )
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(from_fn_with_state(state.clone(), enforce_origin))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS response headers for the allowlisted origins.
///
/// Enforcement lives in [`enforce_origin`]; this layer only emits the
/// `Access-Control-*` headers and answers preflights for origins that parse.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
