//! Glint click analytics collector
//!
//! Small event-ingestion service for an in-page tracker:
//! - Validated page-view/click ingestion into ClickHouse
//! - Session listing and per-session replay timelines
//! - Click heatmap queries per URL
//! - TTL-based event retention

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use api::{router, AppState};
use clickhouse_client::{init_schema, ClickHouseClient, ClickHouseConfig, ClickHouseStore};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Browser origins allowed to call the API. Empty list denies all
    /// browser-origin requests; requests without an Origin header always pass.
    #[serde(default)]
    allowed_origins: Vec<String>,

    #[serde(default)]
    clickhouse: ClickHouseConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            clickhouse: ClickHouseConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Glint collector v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        url = %config.clickhouse.url,
        database = %config.clickhouse.database,
        retention_secs = config.clickhouse.retention_secs,
        allowed_origins = ?config.allowed_origins,
        "Loaded configuration"
    );

    // Initialize ClickHouse client
    let clickhouse = ClickHouseClient::new(config.clickhouse.clone())
        .context("Failed to create ClickHouse client")?;

    // Initialize ClickHouse schema
    if let Err(e) = init_schema(&clickhouse, config.clickhouse.retention_secs).await {
        error!("Failed to initialize ClickHouse schema: {}", e);
        // Continue anyway - schema might already exist
    }

    // Check storage health and record status
    check_health(&clickhouse).await;

    // Create application state
    let store = Arc::new(ClickHouseStore::new(clickhouse));
    let state = AppState::new(store, config.allowed_origins.clone());

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("GLINT")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested ClickHouse config from environment
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(url) = std::env::var("GLINT_CLICKHOUSE_URL") {
        config.clickhouse.url = url;
    }
    if let Ok(database) = std::env::var("GLINT_CLICKHOUSE_DATABASE") {
        config.clickhouse.database = database;
    }
    if let Ok(username) = std::env::var("GLINT_CLICKHOUSE_USERNAME") {
        config.clickhouse.username = Some(username);
    }
    if let Ok(password) = std::env::var("GLINT_CLICKHOUSE_PASSWORD") {
        config.clickhouse.password = Some(password);
    }
    if let Ok(retention) = std::env::var("GLINT_CLICKHOUSE_RETENTION_SECS") {
        if let Ok(secs) = retention.parse() {
            config.clickhouse.retention_secs = secs;
        }
    }

    // Origin allowlist override (comma-separated). Deliberately not named
    // after the config field: the env source would hand the raw string to the
    // Vec field and fail before this override runs.
    if let Ok(origins) = std::env::var("GLINT_CORS_ORIGINS") {
        config.allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    Ok(config)
}

/// Check storage health on startup.
async fn check_health(clickhouse: &ClickHouseClient) {
    let ch_healthy = clickhouse_client::check_connection(clickhouse).await;
    if ch_healthy {
        health().storage.set_healthy();
        info!("ClickHouse connection: healthy");
    } else {
        health().storage.set_unhealthy("Connection failed");
        error!("ClickHouse connection: unhealthy");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
