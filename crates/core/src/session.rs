//! Session aggregation types.
//!
//! A session is whatever the tracker says it is: a client-generated token
//! grouping all events from one browser profile. The server never validates
//! or deduplicates session identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the session listing, aggregated over all events sharing a
/// `session_id`. Field names match the dashboard wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "_id")]
    pub session_id: String,
    /// Earliest event timestamp in the session.
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    /// Latest event timestamp in the session.
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "eventCount")]
    pub event_count: u64,
}
