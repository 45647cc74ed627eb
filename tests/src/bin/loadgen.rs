//! Standalone load generator.
//!
//! Builds a gateway from environment-selected strategy and concurrency,
//! fires the load, prints the aggregate report. Run the same load twice,
//! once per strategy, to watch the success rate collapse:
//!
//! ```bash
//! PG_STRATEGY=fast    PG_LOAD=40 cargo run -p pg-tests --bin loadgen
//! PG_STRATEGY=audited PG_LOAD=40 cargo run -p pg-tests --bin loadgen
//! ```

use gateway_telemetry::{init_telemetry, TelemetryConfig};
use pg_01_intent_store::{build_store, ContentionTracker};
use pg_03_payments::PaymentService;
use pg_tests::load::LoadDriver;
use shared_types::{GatewayConfig, StorageStrategy};
use std::sync::Arc;
use tracing::info;

fn strategy_from_env() -> Result<StorageStrategy, String> {
    match std::env::var("PG_STRATEGY").as_deref() {
        Ok("audited") => Ok(StorageStrategy::Audited),
        Ok("fast") | Err(_) => Ok(StorageStrategy::Fast),
        Ok(other) => Err(format!("unknown PG_STRATEGY {other:?}")),
    }
}

fn concurrency_from_env() -> Result<usize, String> {
    match std::env::var("PG_LOAD") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("PG_LOAD must be a number, got {raw:?}")),
        Err(_) => Ok(20),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = init_telemetry(&TelemetryConfig::from_env())?;

    let strategy = strategy_from_env()?;
    let concurrency = concurrency_from_env()?;
    let config = GatewayConfig::default().with_strategy(strategy);
    config.validate()?;

    info!(?strategy, concurrency, "starting load run");

    let tracker = Arc::new(ContentionTracker::new());
    let store = build_store(&config, tracker.clone());
    let service = Arc::new(PaymentService::new(store, config));

    let report = LoadDriver::new(concurrency).run(service).await;

    println!("{report}");
    assert_eq!(tracker.current_load(), 0, "contention tracker not drained");
    Ok(())
}
