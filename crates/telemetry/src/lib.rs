//! Internal telemetry: tracing setup, health registry, in-process metrics.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::{health, HealthRegistry, HealthStatus};
pub use metrics::{metrics, Counter, Histogram, Metrics};
pub use tracing_setup::{init_tracing, init_tracing_from_env, TracingConfig};
