//! Event type definitions for the collector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};

/// Well-known event type values.
///
/// The ingestion path does not restrict `event_type` to this set: unknown
/// values are stored as-is, which is the intended behavior for an analytics
/// beacon. Only the heatmap query cares about a specific type.
pub mod event_types {
    pub const PAGE_VIEW: &str = "page_view";
    pub const CLICK: &str = "click";
}

/// Incoming tracker payload for a single event.
///
/// `session_id`, `event_type`, and `url` must be present and non-empty.
/// The coordinate and environment fields accompany click events only and are
/// persisted without further schema enforcement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventPayload {
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
    #[validate(length(min = 1, message = "event_type is required"))]
    pub event_type: String,
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
    /// Client event time; the storage layer defaults this to ingestion time
    /// when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Absolute document-pixel coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,

    /// Coordinates normalized to effective document size (0..1).
    /// Null when the document dimension was zero at click time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_y: Option<f64>,

    // Environment snapshot captured at click time, used for replay fidelity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_pixel_ratio: Option<f64>,
}

impl EventPayload {
    /// Parses and validates a raw JSON body.
    ///
    /// A missing or empty required field is a validation error, not a
    /// serialization panic further down the pipeline.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let payload: Self =
            serde_json::from_slice(bytes).map_err(|e| Error::validation(e.to_string()))?;
        payload
            .validate()
            .map_err(|e| Error::validation(flatten_validation_errors(&e)))?;
        Ok(payload)
    }
}

/// Renders validator output as a single human-readable message.
fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// A persisted event, as returned by the session detail endpoint.
///
/// `event_id` is assigned by the storage layer; events are immutable once
/// written and are removed only by the retention TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: Uuid,
    pub session_id: String,
    pub event_type: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_pixel_ratio: Option<f64>,
}

impl StoredEvent {
    /// Materializes a validated payload into a storable event, assigning the
    /// record identifier and defaulting the timestamp to ingestion time.
    pub fn from_payload(payload: EventPayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            session_id: payload.session_id,
            event_type: payload.event_type,
            url: payload.url,
            timestamp: payload.timestamp.unwrap_or_else(Utc::now),
            position_x: payload.position_x,
            position_y: payload.position_y,
            rel_x: payload.rel_x,
            rel_y: payload.rel_y,
            doc_w: payload.doc_w,
            doc_h: payload.doc_h,
            viewport_w: payload.viewport_w,
            viewport_h: payload.viewport_h,
            scroll_x: payload.scroll_x,
            scroll_y: payload.scroll_y,
            device_pixel_ratio: payload.device_pixel_ratio,
        }
    }

    pub fn is_click(&self) -> bool {
        self.event_type == event_types::CLICK
    }
}

/// Heatmap projection of a click event.
///
/// Exactly the coordinate and environment fields a replay surface needs,
/// deliberately excluding the record identifier. Fields are emitted as null
/// rather than omitted so every sample has the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickSample {
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub rel_x: Option<f64>,
    pub rel_y: Option<f64>,
    pub doc_w: Option<u32>,
    pub doc_h: Option<u32>,
    pub viewport_w: Option<u32>,
    pub viewport_h: Option<u32>,
    pub scroll_x: Option<f64>,
    pub scroll_y: Option<f64>,
    pub device_pixel_ratio: Option<f64>,
}

impl From<&StoredEvent> for ClickSample {
    fn from(event: &StoredEvent) -> Self {
        Self {
            position_x: event.position_x,
            position_y: event.position_y,
            rel_x: event.rel_x,
            rel_y: event.rel_y,
            doc_w: event.doc_w,
            doc_h: event.doc_h,
            viewport_w: event.viewport_w,
            viewport_h: event.viewport_h,
            scroll_x: event.scroll_x,
            scroll_y: event.scroll_y,
            device_pixel_ratio: event.device_pixel_ratio,
        }
    }
}
