//! Core domain entities for the payment gateway.
//!
//! Defines the transaction status state machine, the transaction record and
//! its one-time code, and the audit-trail categories used by the audited
//! storage strategy.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::time::Instant;
use uuid::Uuid;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Current wall-clock time in milliseconds since UNIX epoch.
///
/// Used only for record bookkeeping fields; all deadline arithmetic uses
/// the monotonic [`tokio::time::Instant`] clock instead.
pub fn unix_ms() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

/// Unique identifier for a payment transaction.
///
/// Generated once at record creation and immutable afterwards. Callers hold
/// ids, never records: readiness is decided by the store, not by a cached
/// local view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Transaction status state machine.
///
/// Transitions are monotonic and forward-only:
///
/// ```text
/// [CREATED] ──ready──→ [AWAITING_CODE] ──match──→ [CODE_VERIFIED] ──→ [COMPLETED]
///     │                      │
///     └───── timeout ────────┴─ timeout / expiry / mismatch ──→ [FAILED]
/// ```
///
/// Backward transitions never occur; a terminal state is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Record exists; readiness writes not yet visible to readers.
    #[default]
    Created,
    /// Readiness writes are durably applied; a code may be generated.
    AwaitingCode,
    /// The submitted code matched and was consumed.
    CodeVerified,
    /// Terminal success.
    Completed,
    /// Terminal failure (generation timeout, expired code, or a wrong
    /// verification attempt).
    Failed,
}

impl TransactionStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if `next` is a legal forward transition from `self`.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Created, AwaitingCode)
                | (Created, Failed)
                | (AwaitingCode, CodeVerified)
                | (AwaitingCode, Failed)
                | (CodeVerified, Completed)
        )
    }

    /// Stable lowercase name, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AwaitingCode => "awaiting_code",
            Self::CodeVerified => "code_verified",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The simulated-durable representation of one payment attempt.
///
/// Owned by the storage layer's record space; the orchestrator holds only
/// the id and re-fetches state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Unique identifier, immutable.
    pub id: TransactionId,
    /// Current status. Mutated only through the store's transition path.
    pub status: TransactionStatus,
    /// Opaque masked payment reference. Never the raw sensitive input.
    pub masked_reference: String,
    /// Creation timestamp (ms).
    pub created_at: Timestamp,
    /// Set exactly when the status becomes `AwaitingCode`.
    pub ready_at: Option<Timestamp>,
    /// Set exactly when the status becomes `Completed`.
    pub completed_at: Option<Timestamp>,
}

impl TransactionRecord {
    /// Creates a fresh record in the `Created` state.
    pub fn new(masked_reference: String) -> Self {
        Self {
            id: TransactionId::new(),
            status: TransactionStatus::Created,
            masked_reference,
            created_at: unix_ms(),
            ready_at: None,
            completed_at: None,
        }
    }
}

/// A short-lived, single-use verification code tied to one transaction.
///
/// Created once per transaction, never regenerated. Logically destroyed by
/// consumption or expiry.
#[derive(Clone, Debug)]
pub struct OneTimeCode {
    /// Fixed-length numeric string.
    pub value: String,
    /// Back-reference to the owning transaction (lookup only).
    pub transaction_id: TransactionId,
    /// When the code was issued.
    pub issued_at: Instant,
    /// `issued_at + validity window`. Independent of (and typically much
    /// longer than) the generation deadline.
    pub expires_at: Instant,
    /// Set true on first successful verification; verification after
    /// consumption fails.
    pub consumed: bool,
}

impl OneTimeCode {
    /// Creates a live code expiring `validity` after `issued_at`.
    pub fn new(
        transaction_id: TransactionId,
        value: String,
        issued_at: Instant,
        validity: std::time::Duration,
    ) -> Self {
        Self {
            value,
            transaction_id,
            issued_at,
            expires_at: issued_at + validity,
            consumed: false,
        }
    }

    /// Returns true if the validity window has elapsed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Constant-shape comparison against a submitted value.
    pub fn matches(&self, submitted: &str) -> bool {
        self.value == submitted
    }
}

/// Audit-trail categories written by the audited storage strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Intent record was inserted.
    Created,
    /// Status moved to awaiting-code.
    StatusChanged,
}

impl AuditKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChanged => "status_changed",
        }
    }
}

/// Masks a raw payment reference down to its trailing four digits.
///
/// Separators are ignored; fewer than four digits masks everything. The raw
/// input never leaves this function into any stored or logged value.
pub fn mask_reference(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "****".to_string();
    }
    let last_four: String = digits[digits.len() - 4..].iter().collect();
    format!("****{}", last_four)
}
