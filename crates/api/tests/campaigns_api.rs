//! HTTP-level integration tests for donation campaigns, donations and
//! payment intents.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json_auth, put_json_auth,
    seed_user,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWNER: &str = "ann@example.com";
const DONOR: &str = "dana@example.com";

fn new_campaign(target_cents: i64) -> serde_json::Value {
    let last_date = (Utc::now().date_naive() + Duration::days(30)).to_string();
    json!({
        "pet_name": "Milo",
        "pet_image": "https://img.example/milo.png",
        "max_donation_cents": target_cents,
        "last_date": last_date,
        "short_description": "Surgery fund",
    })
}

async fn create_campaign(pool: &PgPool, token: &str, target_cents: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/campaigns", new_campaign(target_cents), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn donation(campaign_id: i64, amount_cents: i64, tx: &str) -> serde_json::Value {
    json!({
        "campaign_id": campaign_id,
        "donor_name": "Dana",
        "amount_cents": amount_cents,
        "transaction_id": tx,
    })
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_list_campaigns(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_campaign(&pool, &owner, 50_000).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/campaigns").await).await;
    assert_eq!(json["data"][0]["id"], id);
    assert_eq!(json["data"][0]["owner_email"], OWNER);
    assert_eq!(json["data"][0]["donated_cents"], 0);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/campaigns/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/my-campaigns", &owner).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_target_is_validated(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/campaigns", new_campaign(0), &owner).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn paused_campaign_leaves_list_and_refuses_donations(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;
    let id = create_campaign(&pool, &owner, 50_000).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/campaigns/{id}/pause"),
        json!({ "paused": true }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/campaigns").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/donations", donation(id, 1_000, "pi_1"), &donor).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_updates_campaign(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let other = seed_user(&pool, "Eve", "eve@example.com", "user").await;
    let id = create_campaign(&pool, &owner, 50_000).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/campaigns/{id}"),
        json!({ "max_donation_cents": 80_000 }),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/campaigns/{id}"),
        json!({ "max_donation_cents": 80_000 }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["max_donation_cents"], 80_000);
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn donation_flow_record_list_refund(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;
    let id = create_campaign(&pool, &owner, 50_000).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/donations", donation(id, 2_500, "pi_1"), &donor).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let donation_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/campaigns/{id}")).await).await;
    assert_eq!(json["data"]["donated_cents"], 2_500);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/my-donations", &donor).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &format!("/campaigns/{id}/donations"), &owner).await).await;
    assert_eq!(json["data"][0]["donor_email"], DONOR);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/donations/{donation_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/donations/{donation_id}"), &donor).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/campaigns/{id}")).await).await;
    assert_eq!(json["data"]["donated_cents"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn donation_over_target_is_rejected(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;
    let id = create_campaign(&pool, &owner, 1_000).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/donations", donation(id, 1_001, "pi_1"), &donor).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replayed_transaction_is_conflict(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;
    let id = create_campaign(&pool, &owner, 50_000).await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/donations", donation(id, 1_000, "pi_1"), &donor).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/donations", donation(id, 1_000, "pi_1"), &donor).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Payment intents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn payment_intent_returns_client_secret(pool: PgPool) {
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;

    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/create-payment-intent", json!({ "price": 12.5 }), &donor).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["clientSecret"],
        "pi_test_1250_secret"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn payment_intent_rejects_non_positive_price(pool: PgPool) {
    let donor = seed_user(&pool, "Dana", DONOR, "user").await;

    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/create-payment-intent", json!({ "price": 0 }), &donor).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
