//! Heatmap query handler.

use axum::{
    extract::{Query, State},
    Json,
};
use glint_core::ClickSample;
use serde::Deserialize;
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub url: Option<String>,
}

/// GET /api/events/heatmap - every click recorded against one URL.
///
/// The query string arrives percent-decoded. No pagination: the response is
/// proportional to click traffic on the page, and the replay surface wants
/// all of it at once.
pub async fn heatmap_handler(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<Vec<ClickSample>>, ApiError> {
    let url = match query.url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(ApiError::bad_request("URL parameter required")),
    };

    let clicks = state.store.clicks_for_url(url).await?;

    debug!(url = %url, clicks = clicks.len(), "Heatmap query");

    Ok(Json(clicks))
}
