//! Application state shared across handlers.

use clickhouse_client::EventStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Event store (ClickHouse in production, in-memory in tests)
    pub store: Arc<dyn EventStore>,
    /// Browser origins allowed to call the API
    pub allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, allowed_origins: Vec<String>) -> Self {
        Self {
            store,
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    /// Whether a browser-supplied Origin value is allowlisted.
    ///
    /// An empty allowlist denies every browser origin; requests without an
    /// Origin header never reach this check.
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}
