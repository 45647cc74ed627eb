//! Boundary request and response shapes.
//!
//! serde-derived and transport-independent: any frontend (HTTP handler,
//! load driver, test) speaks these shapes. Responses carry outcomes, not
//! errors; a declined payment is a normal payload.

use serde::{Deserialize, Serialize};
use shared_types::TransactionId;

fn default_amount() -> f64 {
    100.00
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_merchant() -> String {
    "demo_merchant".to_string()
}

/// Incoming payment request.
///
/// `reference` is the raw sensitive payment reference; it is masked before
/// any storage call and never stored or logged verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub reference: String,
    pub holder_name: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_merchant")]
    pub merchant_id: String,
}

impl PaymentRequest {
    /// A well-formed request with defaulted amount, currency and merchant.
    pub fn new(reference: impl Into<String>, holder_name: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            holder_name: holder_name.into(),
            amount: default_amount(),
            currency: default_currency(),
            merchant_id: default_merchant(),
        }
    }
}

/// Outcome of an initiate call.
///
/// `success=false` covers both validation rejects (no transaction created,
/// `transaction_id` absent) and generation timeouts (transaction failed,
/// `transaction_id` present, `code` absent).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InitiateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Incoming verification request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub transaction_id: TransactionId,
    pub code: String,
}

/// Verification result status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    /// Code matched; the transaction is completed.
    Completed,
    /// Uniform rejection for every other case.
    Rejected,
}

/// Outcome of a verify call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: VerifyStatus,
    pub message: String,
}

impl VerifyResponse {
    pub(crate) fn completed() -> Self {
        Self {
            status: VerifyStatus::Completed,
            message: "Payment completed.".to_string(),
        }
    }

    // One message for every rejection cause; the real reason goes to the
    // debug log only.
    pub(crate) fn rejected() -> Self {
        Self {
            status: VerifyStatus::Rejected,
            message: "Verification failed.".to_string(),
        }
    }
}

/// Liveness snapshot. Always healthy: payload-level declines are not
/// process faults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
    pub otp_service: String,
}
