//! Route definitions for users and tokens.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST  /jwt                -> issue_token
/// GET   /users              -> list (admin)
/// POST  /users              -> register
/// GET   /users/admin/{key}  -> admin_status (key = email)
/// PATCH /users/admin/{key}  -> promote (key = id, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(users::issue_token))
        .route("/users", get(users::list).post(users::register))
        .route(
            "/users/admin/{key}",
            get(users::admin_status).patch(users::promote),
        )
}
