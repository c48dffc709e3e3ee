//! Browser-origin allowlist enforcement.
//!
//! Requests without an Origin header (curl, server-to-server, the tracker's
//! beacon from non-browser runtimes) always pass. Requests carrying an Origin
//! must match the configured allowlist exactly; an empty allowlist denies all
//! browser-origin traffic.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use telemetry::metrics;
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

pub async fn enforce_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !state.origin_allowed(origin) {
            metrics().origin_rejections.inc();
            warn!(origin = %origin, "Rejected cross-origin request");
            return Err(glint_core::Error::ForbiddenOrigin(origin.to_string()).into());
        }
    }

    Ok(next.run(request).await)
}
