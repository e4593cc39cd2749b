//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use petcare_api::error::AppError;
use petcare_core::error::CoreError;
use petcare_core::payments::PaymentError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Pet", "Max"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Pet 'Max' not found");
}

#[tokio::test]
async fn duplicate_request_returns_409_with_failed_message() {
    let err = AppError::Core(CoreError::DuplicateRequest {
        pet_name: "Max".into(),
        requester_email: "b@y.com".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "failed");
    assert_eq!(json["code"], "DUPLICATE_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Pet 'Max' is no longer available".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("bad email".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "bad email");
}

#[tokio::test]
async fn store_unavailable_returns_503_and_sanitizes_message() {
    let err = AppError::Core(CoreError::StoreUnavailable("find_pet timed out".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "STORE_UNAVAILABLE");
    assert!(!json["error"].as_str().unwrap().contains("find_pet"));
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_401_and_403() {
    let (status, _) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        error_to_response(AppError::Core(CoreError::Forbidden("not yours".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn payment_provider_error_returns_502() {
    let err = AppError::Payment(PaymentError::Provider("connection reset".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "PAYMENT_PROVIDER_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn invalid_payment_amount_returns_400() {
    let err = AppError::Payment(PaymentError::InvalidAmount("price must be positive".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
