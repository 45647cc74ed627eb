//! The time-bounded readiness wait and code issuance.

use crate::domain::{synthesize_code, GenerateOutcome};
use pg_01_intent_store::{IntentStore, StoreError};
use shared_types::{GatewayConfig, OneTimeCode, TransactionId, TransactionStatus};
use std::sync::Arc;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// One-time-code generator over the intent store port.
pub struct CodeGenerator {
    store: Arc<dyn IntentStore>,
    config: GatewayConfig,
}

impl CodeGenerator {
    /// Creates a generator over the given store.
    pub fn new(store: Arc<dyn IntentStore>, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    /// Polls the store for transaction readiness and issues a code.
    ///
    /// `deadline` is absolute: the clock is the caller's, so the budget can
    /// span the caller's own readiness writes. The wait is a bounded poll
    /// loop, not a busy spin, and is cancelable only by deadline expiry.
    /// Exactly one attempt; no retries at this layer or above.
    ///
    /// # Errors
    /// Only invariant-breaking store faults propagate. A `NotFound` during
    /// the poll is tolerated (the creation write may still be in flight)
    /// and simply means "not ready yet".
    pub async fn generate(
        &self,
        id: TransactionId,
        deadline: Instant,
    ) -> Result<GenerateOutcome, StoreError> {
        loop {
            match self.store.get_status(id).await {
                Ok(TransactionStatus::AwaitingCode) => break,
                Ok(TransactionStatus::Failed) => {
                    debug!(%id, "transaction already failed, aborting wait");
                    return Ok(GenerateOutcome::Aborted);
                }
                Ok(_) | Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(%id, "deadline elapsed before readiness was observed");
                return Ok(GenerateOutcome::TimedOut);
            }
            sleep(self.config.poll_interval.min(deadline - now)).await;
        }

        // Readiness observed; make sure enough budget remains to issue.
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining < self.config.min_issue_headroom {
            warn!(%id, ?remaining, "readiness observed too late to issue a code");
            return Ok(GenerateOutcome::TimedOut);
        }

        let issued_at = Instant::now();
        let code = OneTimeCode::new(
            id,
            synthesize_code(self.config.code_length),
            issued_at,
            self.config.otp_validity,
        );
        self.store.put_code(code.clone()).await?;
        debug!(%id, "one-time code issued");
        Ok(GenerateOutcome::Issued(code))
    }
}
