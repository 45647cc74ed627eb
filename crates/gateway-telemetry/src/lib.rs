//! # Gateway Telemetry
//!
//! Structured logging bootstrap for the payment-gateway demo.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("failed to init telemetry");
//!
//!     // Application code here; tracing events are now collected.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PG_LOG_LEVEL` | `info` | Log level filter (env-filter syntax) |
//! | `PG_SERVICE_NAME` | `payment-gateway` | Service name stamped on startup |

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Invalid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(String),
}

/// Telemetry configuration, usually read from the environment.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Service name stamped on the startup event.
    pub service_name: String,
    /// env-filter directive string, e.g. `info` or `pg_01_intent_store=debug`.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "payment-gateway".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Reads configuration from `PG_*` environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: std::env::var("PG_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: std::env::var("PG_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

/// Guard that keeps telemetry active for the lifetime of the process.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "shutting down telemetry");
    }
}

/// Installs the global tracing subscriber.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(service = %config.service_name, "telemetry initialized");
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}
