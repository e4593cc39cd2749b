//! Route definitions for pets.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// ```text
/// GET    /pets               -> browse
/// POST   /pets               -> create
/// GET    /pet?id=            -> get_by_id
/// GET    /my-pets            -> list_mine
/// PUT    /pets/{id}          -> update
/// DELETE /pets/{id}          -> delete
/// PATCH  /pets/{id}/adopted  -> set_adopted
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(pets::browse).post(pets::create))
        .route("/pet", get(pets::get_by_id))
        .route("/my-pets", get(pets::list_mine))
        .route("/pets/{id}", put(pets::update).delete(pets::delete))
        .route("/pets/{id}/adopted", patch(pets::set_adopted))
}
