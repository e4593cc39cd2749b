pub mod adoptions;
pub mod campaigns;
pub mod donations;
pub mod health;
pub mod pets;
pub mod users;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the API route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /jwt                                  issue access token (public)
/// /users                                register (public), list (admin)
/// /users/admin/{email}                  admin check (self)
/// /users/admin/{id}                     promote (admin, PATCH)
///
/// /pets                                 browse (public), create
/// /pet?id=                              single pet (public)
/// /my-pets                              caller's pets
/// /pets/{id}                            update, delete (owner)
/// /pets/{id}/adopted                    set availability (owner)
///
/// /adoptions                            submit, accept (PATCH)
/// /adoptions/{email}                    requests for owner (self)
/// /adoptions/reconcile                  re-derive availability (admin)
///
/// /campaigns                            list active (public), create
/// /campaigns/{id}                       get (public), update (owner)
/// /campaigns/{id}/pause                 pause / resume (owner)
/// /campaigns/{id}/donations             donations received (owner)
/// /my-campaigns                         caller's campaigns
///
/// /create-payment-intent                payment intent for a price
/// /donations                            record donation
/// /donations/{id}                       refund (donor)
/// /my-donations                         caller's donations
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(pets::router())
        .merge(adoptions::router())
        .merge(campaigns::router())
        .merge(donations::router())
        .route(
            "/create-payment-intent",
            post(handlers::payments::create_intent),
        )
}
