//! HTTP-level integration tests for owner pet management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json, post_json_auth,
    put_json_auth, seed_user,
};
use serde_json::json;
use sqlx::PgPool;

const OWNER: &str = "ann@example.com";

fn new_pet(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "category": "cat",
        "image": "https://img.example/cat.png",
        "age": 2,
        "location": "Springfield",
        "short_description": "Calm and friendly",
    })
}

async fn create_pet(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/pets", new_pet(name), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_pet_sets_caller_as_owner(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/pets", new_pet("Luna"), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "success");
    assert_eq!(json["data"]["owner_email"], OWNER);
    assert_eq!(json["data"]["owner_name"], "Ann");
    assert_eq!(json["data"]["adopted"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_pet_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/pets", new_pet("Luna")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_pet_rejects_invalid_fields(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;

    let app = common::build_test_app(pool);
    let mut body = new_pet("");
    body["image"] = json!("not a url");
    let response = post_json_auth(app, "/pets", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_single_pet_and_my_pets(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_pet(&pool, &token, "Luna").await;
    create_pet(&pool, &token, "Nala").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/pet?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Luna");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/pet?id=424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/my-pets", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Update / adopt / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_updates_pet(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_pet(&pool, &token, "Luna").await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/pets/{id}"),
        json!({ "location": "Shelbyville" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["location"], "Shelbyville");
    assert_eq!(json["data"]["name"], "Luna");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_owner_cannot_modify_pet(pool: PgPool) {
    let owner = seed_user(&pool, "Ann", OWNER, "user").await;
    let other = seed_user(&pool, "Eve", "eve@example.com", "user").await;
    let id = create_pet(&pool, &owner, "Luna").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &format!("/pets/{id}"), json!({ "name": "Mine" }), &other)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/pets/{id}"), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_marks_pet_adopted_and_it_leaves_browse(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_pet(&pool, &token, "Luna").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/pets/{id}/adopted"),
        json!({ "adopted": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["adopted"], true);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/pets").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_relists_pet_without_requests(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_pet(&pool, &token, "Luna").await;

    for adopted in [true, false] {
        let app = common::build_test_app(pool.clone());
        let response = patch_json_auth(
            app,
            &format!("/pets/{id}/adopted"),
            json!({ "adopted": adopted }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/pets").await).await;
    assert_eq!(json["data"][0]["id"], id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn relist_refused_while_request_holds_pet(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let requester = seed_user(&pool, "Bob", "bob@example.com", "user").await;
    let id = create_pet(&pool, &token, "Luna").await;

    let app = common::build_test_app(pool.clone());
    let request = json!({
        "pet_name": "Luna",
        "pet_category": "cat",
        "owner_name": "Ann",
        "owner_email": OWNER,
        "requester_name": "Bob",
        "requester_phone": "555-0100",
        "requester_address": "1 Main St",
    });
    let response = post_json_auth(app, "/adoptions", request, &requester).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/pets/{id}/adopted"),
        json!({ "adopted": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/pets").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_deletes_pet(pool: PgPool) {
    let token = seed_user(&pool, "Ann", OWNER, "user").await;
    let id = create_pet(&pool, &token, "Luna").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/pets/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/pet?id={id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
