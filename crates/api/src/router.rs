//! Router for the adoption and fundraising API.
//!
//! [`build_app_router`] is shared by `main.rs` and `tests/common/mod.rs` so
//! the adoption endpoints are always exercised behind the production
//! middleware stack.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode, Uri};
use axum::Router;
use petcare_core::error::CoreError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID: &str = "x-request-id";

/// Build the full application [`Router`] with all middleware layers.
///
/// Unknown paths answer with the same JSON error body as the handlers.
/// The middleware stack is applied bottom-up:
///
/// 1. CORS (exposes `x-request-id` so browser clients can quote it)
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout, which must exceed the adoption store timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static(REQUEST_ID);

    if Duration::from_secs(config.request_timeout_secs)
        <= Duration::from_millis(config.store_timeout_ms)
    {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs,
            store_timeout_ms = config.store_timeout_ms,
            "Request timeout does not exceed store timeout; adoption calls may surface as 408",
        );
    }

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .fallback(unknown_route)
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([HeaderName::from_static(REQUEST_ID)])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

async fn unknown_route(uri: Uri) -> AppError {
    CoreError::not_found("Route", uri.path()).into()
}
