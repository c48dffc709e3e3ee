//! ClickHouse client wrapper.

use crate::config::ClickHouseConfig;
use clickhouse::Client;
use glint_core::Result;
use tracing::info;

/// Thin wrapper around the ClickHouse HTTP client.
///
/// The underlying client multiplexes over a hyper connection pool, so one
/// instance is shared across all request handlers.
#[derive(Clone)]
pub struct ClickHouseClient {
    inner: Client,
}

impl ClickHouseClient {
    /// Creates a new ClickHouse client from the configuration.
    pub fn new(config: ClickHouseConfig) -> Result<Self> {
        let mut client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database);

        if let Some(ref user) = config.username {
            client = client.with_user(user);
        }

        if let Some(ref pass) = config.password {
            client = client.with_password(pass);
        }

        info!(
            url = %config.url,
            database = %config.database,
            "Created ClickHouse client"
        );

        Ok(Self { inner: client })
    }

    /// Returns the inner clickhouse client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}
