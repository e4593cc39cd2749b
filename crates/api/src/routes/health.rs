//! Liveness plus a summary of how adoptions are currently coordinated.

use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the adoption store answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered within the store timeout.
    pub db_healthy: bool,
    pub adoptions: AdoptionHealth,
}

/// Adoption coordination settings in effect for this process.
#[derive(Serialize)]
pub struct AdoptionHealth {
    /// `on_submit` or `on_accept`.
    pub hold_policy: &'static str,
    /// Whether the periodic availability reconciler is running.
    pub reconciler_enabled: bool,
    pub reconcile_interval_secs: u64,
    /// Upper bound on a single store call.
    pub store_timeout_ms: u64,
}

/// GET /health
///
/// The database check shares the adoption store's timeout, so a hung
/// database reports `degraded` instead of hanging the request.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_timeout_ms = state.config.store_timeout_ms;
    let db_healthy = matches!(
        tokio::time::timeout(
            Duration::from_millis(store_timeout_ms),
            petcare_db::health_check(&state.pool),
        )
        .await,
        Ok(Ok(()))
    );

    if !db_healthy {
        tracing::warn!(store_timeout_ms, "Adoption store unreachable from health check");
    }

    let reconcile_interval_secs = state.config.reconcile_interval_secs;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        adoptions: AdoptionHealth {
            hold_policy: state.adoptions.policy().as_str(),
            reconciler_enabled: reconcile_interval_secs > 0,
            reconcile_interval_secs,
            store_timeout_ms,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
