//! Session listing and replay timeline handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use glint_core::{SESSION_EVENTS_PAGE, SESSION_LIST_PAGE};
use serde::Deserialize;
use tracing::debug;

use crate::response::{ApiError, SessionEventsResponse, SessionListResponse};
use crate::state::AppState;

/// Caller-supplied pagination window.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

/// GET /api/sessions - paginated session summaries, newest first.
pub async fn list_sessions_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SessionListResponse>, ApiError> {
    let page = SESSION_LIST_PAGE.resolve(query.limit, query.skip);

    // One extra row tells us whether another page exists
    let rows = state
        .store
        .list_sessions(page.fetch_limit(), page.skip)
        .await?;
    let (data, has_more) = page.split(rows);

    debug!(
        sessions = data.len(),
        has_more = has_more,
        "Listed sessions"
    );

    Ok(Json(SessionListResponse {
        data,
        page: page.page(),
        limit: page.limit,
        skip: page.skip,
        has_more,
    }))
}

/// GET /api/sessions/:session_id - chronological event timeline.
///
/// An unknown session is an empty page, not an error.
pub async fn session_events_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SessionEventsResponse>, ApiError> {
    let page = SESSION_EVENTS_PAGE.resolve(query.limit, query.skip);

    let rows = state
        .store
        .session_events(&session_id, page.fetch_limit(), page.skip)
        .await?;
    let (data, has_more) = page.split(rows);

    Ok(Json(SessionEventsResponse {
        data,
        limit: page.limit,
        skip: page.skip,
        has_more,
    }))
}
