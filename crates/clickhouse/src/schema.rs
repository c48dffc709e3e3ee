//! ClickHouse table schema.
//!
//! One events table holds everything the tracker emits:
//! - LowCardinality for the event type column
//! - DateTime64(3) for millisecond precision
//! - Nullable coordinate/environment columns (click events only)
//! - Row-level TTL enforcing the configured retention window

/// SQL for creating the database.
pub const CREATE_DATABASE: &str = r#"
CREATE DATABASE IF NOT EXISTS glint
"#;

/// SQL for creating the events table.
///
/// Ordered by `(session_id, timestamp, event_id)` so both session replay
/// scans and the per-session aggregation read contiguous ranges. The TTL is
/// baked in at creation time from the configured retention window.
pub fn create_events_table(retention_secs: u64) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS glint.events (
    -- Core identifiers
    event_id String,
    session_id String,

    -- Event classification
    event_type LowCardinality(String),
    url String,
    timestamp DateTime64(3),

    -- Click coordinates (absolute and document-normalized)
    position_x Nullable(Float64),
    position_y Nullable(Float64),
    rel_x Nullable(Float64),
    rel_y Nullable(Float64),

    -- Environment snapshot for replay fidelity
    doc_w Nullable(UInt32),
    doc_h Nullable(UInt32),
    viewport_w Nullable(UInt32),
    viewport_h Nullable(UInt32),
    scroll_x Nullable(Float64),
    scroll_y Nullable(Float64),
    device_pixel_ratio Nullable(Float64)
)
ENGINE = MergeTree()
PARTITION BY toYYYYMM(timestamp)
ORDER BY (session_id, timestamp, event_id)
TTL toDateTime(timestamp) + INTERVAL {retention_secs} SECOND
SETTINGS index_granularity = 8192
"#
    )
}

/// All DDL statements, in execution order.
pub fn all_ddl(retention_secs: u64) -> Vec<String> {
    vec![
        CREATE_DATABASE.to_string(),
        create_events_table(retention_secs),
    ]
}
