#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use petcare_api::auth::jwt::{generate_access_token, JwtConfig};
use petcare_api::config::ServerConfig;
use petcare_api::payments::PaymentConfig;
use petcare_api::router::build_app_router;
use petcare_api::state::AppState;
use petcare_core::adoption::{AdoptionCoordinator, HoldPolicy};
use petcare_core::payments::{PaymentError, PaymentIntent, PaymentProvider};
use petcare_db::models::user::CreateUser;
use petcare_db::repositories::UserRepo;
use petcare_db::PgAdoptionStore;
use sqlx::PgPool;
use tower::ServiceExt;

/// Payment provider that answers every request with a fixed intent.
pub struct FakePayments;

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        Ok(PaymentIntent {
            id: format!("pi_test_{amount_cents}"),
            client_secret: format!("pi_test_{amount_cents}_secret"),
            amount_cents,
            currency: currency.to_string(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_timeout_ms: 5000,
        hold_policy: HoldPolicy::OnSubmit,
        reconcile_interval_secs: 0,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        payment: PaymentConfig {
            secret_key: String::new(),
            api_base: "http://127.0.0.1:9".to_string(),
            currency: "usd".to_string(),
        },
    }
}

/// Build the full application router with the default hold policy.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_policy(pool, HoldPolicy::OnSubmit)
}

/// Build the full application router, mirroring `main.rs`, with the given
/// hold policy and a fake payment provider.
pub fn build_test_app_with_policy(pool: PgPool, policy: HoldPolicy) -> Router {
    let mut config = test_config();
    config.hold_policy = policy;

    let adoptions = Arc::new(AdoptionCoordinator::new(
        Arc::new(PgAdoptionStore::new(pool.clone())),
        policy,
        Duration::from_millis(config.store_timeout_ms),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        adoptions,
        payments: Arc::new(FakePayments),
    };

    build_app_router(state, &config)
}

/// Bearer token for `email` with `role`, signed with the test secret.
pub fn token_for(email: &str, role: &str) -> String {
    generate_access_token(email, role, &test_config().jwt).expect("token generation")
}

/// Insert a user row and return a bearer token for it.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> String {
    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        photo_url: None,
    };
    let (user, _) = UserRepo::create_if_absent(pool, email, &input)
        .await
        .expect("user creation should succeed");
    if role != user.role {
        UserRepo::set_role(pool, user.id, role).await.unwrap();
    }
    token_for(email, role)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
