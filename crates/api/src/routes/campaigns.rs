//! Route definitions for donation campaigns.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// ```text
/// GET   /campaigns                 -> list_active
/// POST  /campaigns                 -> create
/// GET   /campaigns/{id}            -> get_by_id
/// PUT   /campaigns/{id}            -> update
/// PATCH /campaigns/{id}/pause      -> set_paused
/// GET   /campaigns/{id}/donations  -> list_donations
/// GET   /my-campaigns              -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(campaigns::list_active).post(campaigns::create),
        )
        .route(
            "/campaigns/{id}",
            get(campaigns::get_by_id).put(campaigns::update),
        )
        .route("/campaigns/{id}/pause", patch(campaigns::set_paused))
        .route("/campaigns/{id}/donations", get(campaigns::list_donations))
        .route("/my-campaigns", get(campaigns::list_mine))
}
