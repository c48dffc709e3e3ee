//! Tracker SDK for the Glint collector.
//!
//! Mirrors what the in-page JavaScript tracker does: a session token that
//! survives restarts of the host, page-view and click events with absolute
//! and document-normalized coordinates, and a fire-and-forget beacon send.
//!
//! Delivery contract: at-most-once and lossy. A send that fails (network
//! error, host teardown mid-request, non-2xx response) is logged and dropped;
//! there is no completion signal, no retry, and no cancellation guarantee.

pub mod beacon;
pub mod geometry;
pub mod session;

pub use beacon::{click_event, page_view_event, ClickSnapshot, Tracker, TrackerConfig};
pub use geometry::{normalize, replay_position, ViewMetrics};
pub use session::{FileTokenStore, MemoryTokenStore, SessionContext, TokenStore};
