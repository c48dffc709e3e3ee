//! Event construction and fire-and-forget delivery.

use chrono::Utc;
use glint_core::{event_types, EventPayload, Result};
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::geometry::{normalize, ViewMetrics};
use crate::session::SessionContext;

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    endpoint: Url,
}

impl TrackerConfig {
    /// Full ingestion endpoint URL.
    pub fn from_endpoint(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| glint_core::Error::validation(format!("invalid endpoint: {}", e)))?;
        Ok(Self { endpoint })
    }

    /// Collector base URL; the standard ingestion path is appended.
    pub fn from_base_url(base: &str) -> Result<Self> {
        let trimmed = base.trim_end_matches('/');
        Self::from_endpoint(&format!("{}/api/events", trimmed))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Everything the tracker sees at click time.
#[derive(Debug, Clone, Copy)]
pub struct ClickSnapshot {
    /// Document-absolute click position.
    pub page_x: f64,
    pub page_y: f64,
    pub view: ViewMetrics,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub device_pixel_ratio: f64,
}

/// Builds a page-view event.
pub fn page_view_event(session_id: &str, url: &str) -> EventPayload {
    EventPayload {
        session_id: session_id.to_string(),
        event_type: event_types::PAGE_VIEW.to_string(),
        url: url.to_string(),
        timestamp: Some(Utc::now()),
        position_x: None,
        position_y: None,
        rel_x: None,
        rel_y: None,
        doc_w: None,
        doc_h: None,
        viewport_w: None,
        viewport_h: None,
        scroll_x: None,
        scroll_y: None,
        device_pixel_ratio: None,
    }
}

/// Builds a click event with absolute and normalized coordinates plus the
/// environment snapshot the heatmap needs for replay.
pub fn click_event(session_id: &str, url: &str, snapshot: &ClickSnapshot) -> EventPayload {
    let doc_w = snapshot.view.document_width();
    let doc_h = snapshot.view.document_height();

    EventPayload {
        session_id: session_id.to_string(),
        event_type: event_types::CLICK.to_string(),
        url: url.to_string(),
        timestamp: Some(Utc::now()),
        position_x: Some(snapshot.page_x),
        position_y: Some(snapshot.page_y),
        rel_x: normalize(snapshot.page_x, doc_w),
        rel_y: normalize(snapshot.page_y, doc_h),
        doc_w: Some(doc_w),
        doc_h: Some(doc_h),
        viewport_w: Some(snapshot.view.inner_width),
        viewport_h: Some(snapshot.view.inner_height),
        scroll_x: Some(snapshot.scroll_x),
        scroll_y: Some(snapshot.scroll_y),
        device_pixel_ratio: Some(snapshot.device_pixel_ratio),
    }
}

/// The tracker: a session context plus a beacon sender.
pub struct Tracker {
    endpoint: Url,
    session: SessionContext,
    http: reqwest::Client,
}

impl Tracker {
    pub fn new(config: TrackerConfig, session: SessionContext) -> Self {
        Self {
            endpoint: config.endpoint,
            session,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    pub fn track_page_view(&self, url: &str) {
        self.dispatch(page_view_event(self.session.session_id(), url));
    }

    pub fn track_click(&self, url: &str, snapshot: &ClickSnapshot) {
        self.dispatch(click_event(self.session.session_id(), url, snapshot));
    }

    /// Detached send. Failures are logged and dropped: the host must be able
    /// to tear down mid-request without waiting on us, and a lost beacon is
    /// acceptable data loss.
    fn dispatch(&self, event: EventPayload) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();

        tokio::spawn(async move {
            match http.post(endpoint).json(&event).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    warn!(status = %resp.status(), "Tracking request rejected");
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Tracking error: {}", e);
                }
            }
        });
    }
}
