//! Route definitions for adoption requests.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::adoptions;
use crate::state::AppState;

/// ```text
/// POST  /adoptions                          -> submit
/// PATCH /adoptions?id=&name=&masterEmail=   -> accept
/// GET   /adoptions/{email}                  -> list_for_owner
/// POST  /adoptions/reconcile                -> reconcile (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/adoptions",
            post(adoptions::submit).patch(adoptions::accept),
        )
        .route("/adoptions/reconcile", post(adoptions::reconcile))
        .route("/adoptions/{email}", get(adoptions::list_for_owner))
}
