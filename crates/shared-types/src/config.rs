//! Gateway configuration with validation.
//!
//! Every timing knob of the simulation lives here so that the failure mode
//! is a matter of configuration, not hard-coded behavior. The struct is a
//! read-only snapshot: services clone it at construction and expose it for
//! runtime inspection, never mutate it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deployment-time choice of storage strategy.
///
/// Both strategies serve the identical capability interface; only their
/// latency profiles differ, so swapping one for the other changes no
/// caller-facing contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStrategy {
    /// Fixed base latency per write, no contention scaling, no audit rows.
    #[default]
    Fast,
    /// Every primary write is followed by an audit write; all writes pay a
    /// contention surcharge scaled by the number of in-flight writers.
    Audited,
}

/// Main gateway configuration snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Wall-clock budget for observing readiness and issuing a code.
    #[serde(with = "duration_ms")]
    pub otp_deadline: Duration,
    /// Validity window of an issued code. Independent of, and typically much
    /// longer than, the generation deadline.
    #[serde(with = "duration_ms")]
    pub otp_validity: Duration,
    /// Length of the numeric one-time code.
    pub code_length: usize,
    /// Sleep between readiness polls (bounded, not a busy spin).
    #[serde(with = "duration_ms")]
    pub poll_interval: Duration,
    /// Minimum remaining budget required to issue a code once readiness is
    /// observed.
    #[serde(with = "duration_ms")]
    pub min_issue_headroom: Duration,
    /// Base latency of the intent-creation write.
    #[serde(with = "duration_ms")]
    pub base_write_latency: Duration,
    /// Latency of the readiness (status-update) write under the audited
    /// strategy. The fast strategy charges `base_write_latency` instead.
    #[serde(with = "duration_ms")]
    pub status_write_latency: Duration,
    /// Latency of each audit write (audited strategy only).
    #[serde(with = "duration_ms")]
    pub audit_write_latency: Duration,
    /// Contention surcharge per concurrently in-flight writer, sampled at
    /// the moment each write begins.
    #[serde(with = "duration_ms")]
    pub contention_delay_per_writer: Duration,
    /// Which storage strategy to construct.
    pub strategy: StorageStrategy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            otp_deadline: Duration::from_millis(400),
            otp_validity: Duration::from_secs(120),
            code_length: 6,
            poll_interval: Duration::from_millis(10),
            min_issue_headroom: Duration::from_millis(50),
            base_write_latency: Duration::from_millis(15),
            status_write_latency: Duration::from_millis(50),
            audit_write_latency: Duration::from_millis(100),
            contention_delay_per_writer: Duration::from_millis(50),
            strategy: StorageStrategy::Fast,
        }
    }
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.otp_deadline.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "otp_deadline cannot be 0".into(),
            ));
        }
        if self.code_length == 0 {
            return Err(ConfigError::InvalidLimit("code_length cannot be 0".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "poll_interval cannot be 0".into(),
            ));
        }
        if self.poll_interval >= self.otp_deadline {
            return Err(ConfigError::InvalidTimeout(
                "poll_interval must be shorter than otp_deadline".into(),
            ));
        }
        if self.min_issue_headroom >= self.otp_deadline {
            return Err(ConfigError::InvalidTimeout(
                "min_issue_headroom must be shorter than otp_deadline".into(),
            ));
        }
        Ok(())
    }

    /// Selects the given strategy, leaving all timing defaults intact.
    pub fn with_strategy(mut self, strategy: StorageStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Creates a minimal config for testing: fast strategy, short waits.
    pub fn for_testing() -> Self {
        Self {
            base_write_latency: Duration::from_millis(1),
            status_write_latency: Duration::from_millis(1),
            poll_interval: Duration::from_millis(1),
            ..Default::default()
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout or interval value.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Serde module representing durations as integer milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}
