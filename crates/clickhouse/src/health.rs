//! ClickHouse health checks and schema init.

use crate::client::ClickHouseClient;
use glint_core::Result;
use tracing::{debug, error};

/// Check ClickHouse connection health.
pub async fn check_connection(client: &ClickHouseClient) -> bool {
    match client.inner().query("SELECT 1").fetch_one::<u8>().await {
        Ok(_) => {
            debug!("ClickHouse connection healthy");
            true
        }
        Err(e) => {
            error!("ClickHouse health check failed: {}", e);
            false
        }
    }
}

/// Initialize the database schema.
///
/// Creates the database and the events table if they don't exist. The
/// retention window is part of the table DDL, so changing it requires a
/// migration on an existing deployment.
pub async fn init_schema(client: &ClickHouseClient, retention_secs: u64) -> Result<()> {
    for ddl in crate::schema::all_ddl(retention_secs) {
        client
            .inner()
            .query(&ddl)
            .execute()
            .await
            .map_err(|e| glint_core::Error::internal(format!("Schema init error: {}", e)))?;
    }

    debug!("ClickHouse schema initialized");
    Ok(())
}
