//! Event store trait and its ClickHouse implementation.
//!
//! The trait is the seam the API is written against; tests swap in an
//! in-memory implementation while production uses [`ClickHouseStore`].

use async_trait::async_trait;
use chrono::DateTime;
use clickhouse::Row;
use glint_core::{ClickSample, Error, Result, SessionSummary, StoredEvent};
use serde::{Deserialize, Serialize};
use telemetry::metrics;
use tracing::debug;
use uuid::Uuid;

use crate::client::ClickHouseClient;
use crate::health::check_connection;

/// Storage operations the collector needs.
///
/// Every operation is a single atomic store call; there is no cross-request
/// coordination and reads are eventually consistent with in-flight writes.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persists one event. The caller has already validated and materialized
    /// it; the record is immutable from here on.
    async fn insert_event(&self, event: StoredEvent) -> Result<()>;

    /// Groups all events by session, newest `startTime` first.
    /// `limit`/`skip` are raw row-window values (the caller handles clamping
    /// and the fetch-one-extra `hasMore` trick).
    async fn list_sessions(&self, limit: u32, skip: u32) -> Result<Vec<SessionSummary>>;

    /// All events for one session in chronological replay order.
    async fn session_events(
        &self,
        session_id: &str,
        limit: u32,
        skip: u32,
    ) -> Result<Vec<StoredEvent>>;

    /// Every click recorded against exactly this URL, projected down to the
    /// replay fields. Unpaginated by contract.
    async fn clicks_for_url(&self, url: &str) -> Result<Vec<ClickSample>>;

    /// Whether the store is reachable.
    async fn ping(&self) -> bool;
}

/// Flattened event row for ClickHouse.
#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct EventRow {
    pub event_id: String,
    pub session_id: String,
    pub event_type: String,
    pub url: String,
    pub timestamp: i64, // DateTime64(3) as milliseconds
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

impl From<StoredEvent> for EventRow {
    fn from(event: StoredEvent) -> Self {
        Self {
            event_id: event.event_id.to_string(),
            session_id: event.session_id,
            event_type: event.event_type,
            url: event.url,
            timestamp: event.timestamp.timestamp_millis(),
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

impl TryFrom<EventRow> for StoredEvent {
    type Error = Error;

    fn try_from(row: EventRow) -> Result<Self> {
        let event_id = Uuid::parse_str(&row.event_id)
            .map_err(|e| Error::storage(format!("invalid event_id {}: {}", row.event_id, e)))?;
        let timestamp = DateTime::from_timestamp_millis(row.timestamp)
            .ok_or_else(|| Error::storage(format!("invalid timestamp {}", row.timestamp)))?;

        Ok(Self {
            event_id,
            session_id: row.session_id,
            event_type: row.event_type,
            url: row.url,
            timestamp,
            position_x: row.position_x,
            position_y: row.position_y,
            rel_x: row.rel_x,
            rel_y: row.rel_y,
            doc_w: row.doc_w,
            doc_h: row.doc_h,
            viewport_w: row.viewport_w,
            viewport_h: row.viewport_h,
            scroll_x: row.scroll_x,
            scroll_y: row.scroll_y,
            device_pixel_ratio: row.device_pixel_ratio,
        })
    }
}

/// Session aggregation row.
#[derive(Debug, Clone, Row, Deserialize)]
struct SessionRow {
    session_id: String,
    start_time: i64,
    end_time: i64,
    event_count: u64,
}

impl TryFrom<SessionRow> for SessionSummary {
    type Error = Error;

    fn try_from(row: SessionRow) -> Result<Self> {
        let start_time = DateTime::from_timestamp_millis(row.start_time)
            .ok_or_else(|| Error::storage(format!("invalid start_time {}", row.start_time)))?;
        let end_time = DateTime::from_timestamp_millis(row.end_time)
            .ok_or_else(|| Error::storage(format!("invalid end_time {}", row.end_time)))?;

        Ok(Self {
            session_id: row.session_id,
            start_time,
            end_time,
            event_count: row.event_count,
        })
    }
}

/// Heatmap projection row.
#[derive(Debug, Clone, Row, Deserialize)]
struct ClickSampleRow {
    position_x: Option<f64>,
    position_y: Option<f64>,
    rel_x: Option<f64>,
    rel_y: Option<f64>,
    doc_w: Option<u32>,
    doc_h: Option<u32>,
    viewport_w: Option<u32>,
    viewport_h: Option<u32>,
    scroll_x: Option<f64>,
    scroll_y: Option<f64>,
    device_pixel_ratio: Option<f64>,
}

impl From<ClickSampleRow> for ClickSample {
    fn from(row: ClickSampleRow) -> Self {
        Self {
            position_x: row.position_x,
            position_y: row.position_y,
            rel_x: row.rel_x,
            rel_y: row.rel_y,
            doc_w: row.doc_w,
            doc_h: row.doc_h,
            viewport_w: row.viewport_w,
            viewport_h: row.viewport_h,
            scroll_x: row.scroll_x,
            scroll_y: row.scroll_y,
            device_pixel_ratio: row.device_pixel_ratio,
        }
    }
}

const SELECT_EVENT_COLUMNS: &str = "event_id, session_id, event_type, url, \
     toUnixTimestamp64Milli(timestamp) AS timestamp, \
     position_x, position_y, rel_x, rel_y, \
     doc_w, doc_h, viewport_w, viewport_h, \
     scroll_x, scroll_y, device_pixel_ratio";

/// ClickHouse-backed event store.
#[derive(Clone)]
pub struct ClickHouseStore {
    client: ClickHouseClient,
}

impl ClickHouseStore {
    pub fn new(client: ClickHouseClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ClickHouseClient {
        &self.client
    }
}

#[async_trait]
impl EventStore for ClickHouseStore {
    async fn insert_event(&self, event: StoredEvent) -> Result<()> {
        let start = std::time::Instant::now();
        let row = EventRow::from(event);

        let mut insert = self.client.inner().insert("glint.events").map_err(|e| {
            metrics().insert_errors.inc();
            Error::storage(format!("Insert error: {}", e))
        })?;

        insert.write(&row).await.map_err(|e| {
            metrics().insert_errors.inc();
            Error::storage(format!("Write error: {}", e))
        })?;

        insert.end().await.map_err(|e| {
            metrics().insert_errors.inc();
            Error::storage(format!("End error: {}", e))
        })?;

        metrics().events_inserted.inc();
        metrics()
            .insert_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        debug!(
            event_id = %row.event_id,
            session_id = %row.session_id,
            "Inserted event"
        );

        Ok(())
    }

    async fn list_sessions(&self, limit: u32, skip: u32) -> Result<Vec<SessionSummary>> {
        let start = std::time::Instant::now();

        let rows: Vec<SessionRow> = self
            .client
            .inner()
            .query(
                "SELECT session_id, \
                     toUnixTimestamp64Milli(min(timestamp)) AS start_time, \
                     toUnixTimestamp64Milli(max(timestamp)) AS end_time, \
                     count() AS event_count \
                 FROM glint.events \
                 GROUP BY session_id \
                 ORDER BY start_time DESC \
                 LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(skip)
            .fetch_all()
            .await
            .map_err(|e| {
                metrics().query_errors.inc();
                Error::storage(format!("Query error: {}", e))
            })?;

        metrics()
            .query_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        rows.into_iter().map(SessionSummary::try_from).collect()
    }

    async fn session_events(
        &self,
        session_id: &str,
        limit: u32,
        skip: u32,
    ) -> Result<Vec<StoredEvent>> {
        let start = std::time::Instant::now();

        let rows: Vec<EventRow> = self
            .client
            .inner()
            .query(&format!(
                "SELECT {} FROM glint.events \
                 WHERE session_id = ? \
                 ORDER BY timestamp ASC \
                 LIMIT ? OFFSET ?",
                SELECT_EVENT_COLUMNS
            ))
            .bind(session_id)
            .bind(limit)
            .bind(skip)
            .fetch_all()
            .await
            .map_err(|e| {
                metrics().query_errors.inc();
                Error::storage(format!("Query error: {}", e))
            })?;

        metrics()
            .query_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        rows.into_iter().map(StoredEvent::try_from).collect()
    }

    async fn clicks_for_url(&self, url: &str) -> Result<Vec<ClickSample>> {
        let start = std::time::Instant::now();

        let rows: Vec<ClickSampleRow> = self
            .client
            .inner()
            .query(
                "SELECT position_x, position_y, rel_x, rel_y, \
                     doc_w, doc_h, viewport_w, viewport_h, \
                     scroll_x, scroll_y, device_pixel_ratio \
                 FROM glint.events \
                 WHERE url = ? AND event_type = 'click'",
            )
            .bind(url)
            .fetch_all()
            .await
            .map_err(|e| {
                metrics().query_errors.inc();
                Error::storage(format!("Query error: {}", e))
            })?;

        metrics()
            .query_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        Ok(rows.into_iter().map(ClickSample::from).collect())
    }

    async fn ping(&self) -> bool {
        check_connection(&self.client).await
    }
}
