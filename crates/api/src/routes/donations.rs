//! Route definitions for donations.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// ```text
/// POST   /donations       -> record
/// DELETE /donations/{id}  -> refund
/// GET    /my-donations    -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations", post(donations::record))
        .route("/donations/{id}", delete(donations::refund))
        .route("/my-donations", get(donations::list_mine))
}
