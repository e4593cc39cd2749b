use std::sync::Arc;

use petcare_core::adoption::AdoptionCoordinator;
use petcare_core::payments::PaymentProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: petcare_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Adoption workflows over the pet registry and request ledger.
    pub adoptions: Arc<AdoptionCoordinator>,
    /// Payment intent provider.
    pub payments: Arc<dyn PaymentProvider>,
}
