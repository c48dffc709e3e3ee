//! Session identity.
//!
//! The session token groups every event from one client lifetime. It is an
//! explicit context object handed to the tracker, not ambient module state,
//! and it is best-effort: random suffix plus timestamp, never validated or
//! deduplicated server-side.

use chrono::Utc;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// Where the session token survives between client lifetimes.
///
/// The browser tracker uses local storage; hosts embedding this SDK pick a
/// file path or keep the token in memory.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
}

/// File-backed token store.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        // Best-effort: a token that fails to persist just means a fresh
        // session next time.
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), "Failed to persist session token: {}", e);
        }
    }
}

/// In-memory token store, cleared when dropped.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: parking_lot::Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        *self.token.lock() = None;
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock() = Some(token.to_string());
    }
}

/// Explicit session context, created once per client lifetime and passed
/// into every outbound call.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: String,
}

impl SessionContext {
    /// Reuses the persisted token if the store has one, otherwise generates
    /// and persists a fresh token.
    pub fn load_or_create(store: &dyn TokenStore) -> Self {
        if let Some(token) = store.load() {
            return Self { session_id: token };
        }

        let token = generate_session_token();
        store.save(&token);
        Self { session_id: token }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// `sess-<random-suffix>-<millis>`, locally unique per browser profile.
fn generate_session_token() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("sess-{}-{}", &suffix[..9], Utc::now().timestamp_millis())
}
