//! Handlers for the pet registry.
//!
//! Browsing goes through the adoption coordinator so it shares the same
//! availability rules as submit and accept. Owner CRUD talks to
//! [`PetRepo`] directly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::adoption::PetFilter;
use petcare_core::error::CoreError;
use petcare_core::types::DbId;
use petcare_db::models::pet::{CreatePet, Pet, UpdatePet};
use petcare_db::repositories::{PetRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /pets`.
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /pet`.
#[derive(Debug, Deserialize)]
pub struct PetIdParams {
    pub id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct SetAdopted {
    pub adopted: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a pet and check the caller owns it.
async fn owned_pet(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Pet> {
    let pet = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Pet", id)))?;
    user.ensure_is(&pet.owner_email)?;
    Ok(pet)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /pets?category=&search=&limit=&offset=
///
/// Available pets, newest listing date first.
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<impl IntoResponse> {
    let filter = PetFilter::new(
        params.category.as_deref(),
        params.search.as_deref(),
        params.limit,
        params.offset,
    );
    let pets = state.adoptions.list(&filter).await?;
    Ok(Json(DataResponse { data: pets }))
}

/// GET /pet?id=
pub async fn get_by_id(
    State(state): State<AppState>,
    Query(params): Query<PetIdParams>,
) -> AppResult<impl IntoResponse> {
    let pet = PetRepo::find_by_id(&state.pool, params.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Pet", params.id)))?;
    Ok(Json(DataResponse { data: pet }))
}

/// POST /pets
///
/// List a new pet owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let owner_name = UserRepo::find_by_email(&state.pool, &user.email)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| user.email.clone());

    let pet = PetRepo::create(&state.pool, &owner_name, &user.email, &input).await?;
    tracing::info!(pet_id = pet.id, owner = %user.email, "Pet listed");
    Ok((StatusCode::CREATED, Json(MessageResponse::success(pet))))
}

/// GET /my-pets
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let pets = PetRepo::list_by_owner(&state.pool, &user.email).await?;
    Ok(Json(DataResponse { data: pets }))
}

/// PUT /pets/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    owned_pet(&state, &user, id).await?;

    let pet = PetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Pet", id)))?;
    Ok(Json(DataResponse { data: pet }))
}

/// PATCH /pets/{id}/adopted
///
/// Owner sets the availability flag directly, outside the request workflow.
/// Relisting is refused with 409 while an adoption request still holds the
/// pet under the active hold policy; reconciliation would otherwise take the
/// pet off the list again.
pub async fn set_adopted(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetAdopted>,
) -> AppResult<impl IntoResponse> {
    owned_pet(&state, &user, id).await?;

    let pet = if input.adopted {
        PetRepo::set_adopted(&state.pool, id, true)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Pet", id)))?
    } else {
        let accepted_only = !state.adoptions.policy().holds_on_submit();
        PetRepo::release(&state.pool, id, accepted_only)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(format!(
                    "Pet {id} is held by an adoption request and cannot be relisted"
                )))
            })?
    };
    tracing::info!(pet_id = id, adopted = input.adopted, "Pet availability set by owner");
    Ok(Json(DataResponse { data: pet }))
}

/// DELETE /pets/{id}
///
/// Remove the caller's pet together with its adoption requests.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_pet(&state, &user, id).await?;

    if PetRepo::delete(&state.pool, id).await? {
        tracing::info!(pet_id = id, owner = %user.email, "Pet deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Pet", id)))
    }
}
