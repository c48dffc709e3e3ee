//! Ingestion endpoint handler.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use glint_core::{EventPayload, StoredEvent};
use std::time::Instant;
use telemetry::metrics;
use tracing::{error, info};

use crate::response::{ApiError, CreatedResponse};
use crate::state::AppState;

/// POST /api/events - tracker beacon ingestion.
///
/// Accepts one event per request. The payload is parsed and validated into a
/// typed structure before persistence; everything past the three required
/// fields is stored as sent. The tracker fires and forgets, so there is no
/// retry or queuing on failure.
pub async fn ingest_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let start = Instant::now();

    metrics().events_received.inc();

    let payload = EventPayload::parse(&body).map_err(|e| {
        metrics().events_rejected.inc();
        ApiError::from(e)
    })?;

    let event = StoredEvent::from_payload(payload);
    let event_type = event.event_type.clone();
    let session_id = event.session_id.clone();

    state.store.insert_event(event).await.map_err(|e| {
        error!("Error saving event: {}", e);
        ApiError::internal("Failed to save event")
    })?;

    metrics()
        .ingest_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    info!(
        event_type = %event_type,
        session_id = %session_id,
        "Event saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Event tracked successfully")),
    ))
}
