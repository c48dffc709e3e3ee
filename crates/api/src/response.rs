//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use glint_core::{SessionSummary, StoredEvent};
use serde::{Deserialize, Serialize};

/// Acknowledgement for a stored event.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Session listing envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub data: Vec<SessionSummary>,
    pub page: u32,
    pub limit: u32,
    pub skip: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Session replay timeline envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionEventsResponse {
    pub data: Vec<StoredEvent>,
    pub limit: u32,
    pub skip: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error type.
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<glint_core::Error> for ApiError {
    fn from(err: glint_core::Error) -> Self {
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}
