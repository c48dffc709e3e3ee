//! ClickHouse event store for the Glint collector.

pub mod client;
pub mod config;
pub mod health;
pub mod schema;
pub mod store;

pub use client::ClickHouseClient;
pub use config::ClickHouseConfig;
pub use health::{check_connection, init_schema};
pub use store::{ClickHouseStore, EventStore};
