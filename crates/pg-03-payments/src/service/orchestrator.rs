//! End-to-end payment flow over the store and generator ports.

use crate::api::{HealthStatus, InitiateResponse, PaymentRequest, VerifyResponse};
use crate::domain::PaymentError;
use pg_01_intent_store::{IntentStore, StoreError};
use pg_02_otp::{CodeGenerator, GenerateOutcome};
use shared_types::{
    mask_reference, AuditKind, GatewayConfig, StorageStrategy, TransactionId, TransactionStatus,
};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Orchestrates one payment attempt from intent to verification.
///
/// Holds the store behind its port and a code generator over the same
/// store. Stateless beyond those handles; every call re-reads the record
/// space.
pub struct PaymentService {
    store: Arc<dyn IntentStore>,
    generator: CodeGenerator,
    config: GatewayConfig,
}

impl PaymentService {
    pub fn new(store: Arc<dyn IntentStore>, config: GatewayConfig) -> Self {
        let generator = CodeGenerator::new(store.clone(), config.clone());
        Self {
            store,
            generator,
            config,
        }
    }

    /// Creates a payment intent and issues its one-time code.
    ///
    /// The generation deadline is anchored here, before the first storage
    /// write: the readiness writes spend the same budget the generator
    /// polls against. Readiness writes and the generator run concurrently;
    /// the generator observes readiness through the store, never through a
    /// local flag.
    ///
    /// A missed deadline declines the payment in the response payload and
    /// fails the transaction. It is not an error and there is no retry.
    ///
    /// # Errors
    /// Only [`StoreError`] faults escalate; see [`PaymentError`].
    pub async fn initiate(
        &self,
        request: PaymentRequest,
    ) -> Result<InitiateResponse, PaymentError> {
        if request.reference.trim().is_empty() || request.holder_name.trim().is_empty() {
            debug!("rejecting malformed payment request");
            return Ok(InitiateResponse {
                success: false,
                transaction_id: None,
                code: None,
                message: "Invalid payment request: reference and holder name are required."
                    .to_string(),
            });
        }

        let deadline = Instant::now() + self.config.otp_deadline;
        // Raw reference stops here; only the mask enters the record space.
        let masked = mask_reference(&request.reference);

        let id = self.store.create_transaction(masked).await?;
        self.store.record_audit(id, AuditKind::Created).await?;
        info!(%id, merchant = %request.merchant_id, "payment intent created");

        let readiness = async {
            self.store.mark_ready(id).await?;
            self.store.record_audit(id, AuditKind::StatusChanged).await
        };
        let (readiness_result, outcome) =
            tokio::join!(readiness, self.generator.generate(id, deadline));
        readiness_result?;

        match outcome? {
            GenerateOutcome::Issued(code) => {
                info!(%id, "payment initiated, code issued");
                Ok(InitiateResponse {
                    success: true,
                    transaction_id: Some(id),
                    code: Some(code.value),
                    message: "Verification code generated.".to_string(),
                })
            }
            GenerateOutcome::TimedOut => {
                warn!(%id, "code generation missed its deadline, failing transaction");
                self.store.transition(id, TransactionStatus::Failed).await?;
                Ok(Self::declined(id))
            }
            GenerateOutcome::Aborted => {
                // Already terminal; no transition to make.
                warn!(%id, "code generation aborted on a failed transaction");
                Ok(Self::declined(id))
            }
        }
    }

    /// Verifies a submitted code against the transaction's issued code.
    ///
    /// Every rejection cause (unknown id, wrong state, consumed, expired,
    /// mismatch) produces the same outward response; the distinction lives
    /// in the debug log only. A mismatch burns the code and fails the
    /// transaction: the attempt limit is one.
    pub async fn verify(
        &self,
        id: TransactionId,
        submitted: &str,
    ) -> Result<VerifyResponse, PaymentError> {
        // The id is caller-supplied, so an unknown one is a rejection, not
        // an invariant break.
        let record = match self.store.fetch(id).await {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => {
                debug!(%id, "verify against unknown transaction");
                return Ok(VerifyResponse::rejected());
            }
            Err(e) => return Err(e.into()),
        };

        if !matches!(
            record.status,
            TransactionStatus::AwaitingCode | TransactionStatus::CodeVerified
        ) {
            debug!(%id, status = %record.status, "verify in non-verifiable state");
            return Ok(VerifyResponse::rejected());
        }

        let code = match self.store.get_code(id).await {
            Ok(code) => code,
            Err(StoreError::CodeNotFound(_)) => {
                debug!(%id, "verify before any code was issued");
                return Ok(VerifyResponse::rejected());
            }
            Err(e) => return Err(e.into()),
        };

        if code.consumed {
            debug!(%id, "verify against an already-consumed code");
            return Ok(VerifyResponse::rejected());
        }
        if code.is_expired(Instant::now()) {
            // Expiry beats correctness: a correct-but-stale code still
            // fails the transaction.
            debug!(%id, "verify against an expired code");
            self.store.transition(id, TransactionStatus::Failed).await?;
            return Ok(VerifyResponse::rejected());
        }
        if !code.matches(submitted) {
            // The attempt limit is one: a mismatch consumes the code and
            // fails the payment. The short numeric code is never left open
            // to a second guess.
            debug!(%id, "submitted code does not match, burning code");
            if self.store.consume_code(id).await? {
                self.store.transition(id, TransactionStatus::Failed).await?;
            }
            return Ok(VerifyResponse::rejected());
        }

        if !self.store.consume_code(id).await? {
            // Lost a race with a concurrent verify; the first one won.
            debug!(%id, "code consumed concurrently");
            return Ok(VerifyResponse::rejected());
        }
        self.store
            .transition(id, TransactionStatus::CodeVerified)
            .await?;
        self.store
            .transition(id, TransactionStatus::Completed)
            .await?;
        info!(%id, "payment completed");
        Ok(VerifyResponse::completed())
    }

    /// Read-only copy of the active configuration.
    pub fn config_snapshot(&self) -> GatewayConfig {
        self.config.clone()
    }

    /// Liveness snapshot. Declined payments never make this unhealthy.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            store: match self.config.strategy {
                StorageStrategy::Fast => "fast".to_string(),
                StorageStrategy::Audited => "audited".to_string(),
            },
            otp_service: "ready".to_string(),
        }
    }

    fn declined(id: TransactionId) -> InitiateResponse {
        InitiateResponse {
            success: false,
            transaction_id: Some(id),
            code: None,
            message: "Unable to generate verification code. Please try again.".to_string(),
        }
    }
}
