//! Pagination contract shared by the query endpoints.
//!
//! The caller supplies `limit` and `skip`; `limit` is clamped to the
//! endpoint's bounds and the store is asked for one extra row so `hasMore`
//! can be derived without a second count query.

use serde::{Deserialize, Serialize};

/// Per-endpoint limit bounds.
#[derive(Debug, Clone, Copy)]
pub struct PageBounds {
    pub default: u32,
    pub max: u32,
}

/// Session listing window.
pub const SESSION_LIST_PAGE: PageBounds = PageBounds {
    default: 20,
    max: 100,
};

/// Session detail window. Replay timelines are fetched in bigger chunks.
pub const SESSION_EVENTS_PAGE: PageBounds = PageBounds {
    default: 200,
    max: 1000,
};

impl PageBounds {
    /// Resolves the caller-supplied values against these bounds.
    pub fn resolve(&self, limit: Option<u32>, skip: Option<u32>) -> PageRequest {
        PageRequest {
            limit: limit.unwrap_or(self.default).clamp(1, self.max),
            skip: skip.unwrap_or(0),
        }
    }
}

/// A resolved pagination window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub skip: u32,
}

impl PageRequest {
    /// 1-based page number for the response envelope.
    pub fn page(&self) -> u32 {
        self.skip / self.limit + 1
    }

    /// How many rows to actually request from the store.
    pub fn fetch_limit(&self) -> u32 {
        self.limit + 1
    }

    /// Splits a fetched batch into the visible page and the `hasMore` flag.
    /// Expects the batch to have been fetched with [`fetch_limit`].
    ///
    /// [`fetch_limit`]: PageRequest::fetch_limit
    pub fn split<T>(&self, mut rows: Vec<T>) -> (Vec<T>, bool) {
        let has_more = rows.len() as u32 > self.limit;
        rows.truncate(self.limit as usize);
        (rows, has_more)
    }
}
