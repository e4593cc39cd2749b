//! Periodic repair of pet availability.
//!
//! Submit and accept write the pet flag and the request ledger in one
//! transaction, but the flag can still be changed by hand. This job
//! re-derives it from the ledger on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use petcare_core::adoption::AdoptionCoordinator;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the reconciliation loop until `cancel` is triggered.
pub async fn run(coordinator: Arc<AdoptionCoordinator>, every: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = every.as_secs(),
        policy = %coordinator.policy(),
        "Availability reconciler started"
    );

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Availability reconciler stopping");
                break;
            }
            _ = interval.tick() => {
                match coordinator.reconcile().await {
                    Ok(0) => tracing::debug!("Availability reconciler: nothing to fix"),
                    Ok(fixed) => tracing::info!(fixed, "Availability reconciler: pets updated"),
                    Err(e) => tracing::error!(error = %e, "Availability reconciler: pass failed"),
                }
            }
        }
    }
}
