//! Handlers for donation campaigns.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::donation::validate_campaign_target;
use petcare_core::error::CoreError;
use petcare_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use petcare_core::types::DbId;
use petcare_db::models::campaign::{CreateCampaign, DonationCampaign, UpdateCampaign};
use petcare_db::repositories::{CampaignRepo, DonationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetPaused {
    pub paused: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_campaign(state: &AppState, id: DbId) -> AppResult<DonationCampaign> {
    CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationCampaign", id)))
}

async fn owned_campaign(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<DonationCampaign> {
    let campaign = find_campaign(state, id).await?;
    user.ensure_is(&campaign.owner_email)?;
    Ok(campaign)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /campaigns?limit=&offset=
///
/// Campaigns that are accepting donations, newest first.
pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let campaigns = CampaignRepo::list_active(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = find_campaign(&state, id).await?;
    Ok(Json(DataResponse { data: campaign }))
}

/// POST /campaigns
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_campaign_target(input.max_donation_cents).map_err(CoreError::Validation)?;

    let campaign = CampaignRepo::create(&state.pool, &user.email, &input).await?;
    tracing::info!(campaign_id = campaign.id, owner = %user.email, "Donation campaign created");
    Ok((StatusCode::CREATED, Json(MessageResponse::success(campaign))))
}

/// PUT /campaigns/{id}
///
/// Update the caller's campaign. The target may not drop below what has
/// already been donated.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let current = owned_campaign(&state, &user, id).await?;

    if let Some(target) = input.max_donation_cents {
        validate_campaign_target(target).map_err(CoreError::Validation)?;
        if target < current.donated_cents {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Campaign target cannot be below the {} cents already donated",
                current.donated_cents
            ))));
        }
    }

    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationCampaign", id)))?;
    Ok(Json(DataResponse { data: campaign }))
}

/// PATCH /campaigns/{id}/pause
pub async fn set_paused(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetPaused>,
) -> AppResult<impl IntoResponse> {
    owned_campaign(&state, &user, id).await?;

    let campaign = CampaignRepo::set_paused(&state.pool, id, input.paused)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationCampaign", id)))?;
    tracing::info!(campaign_id = id, paused = input.paused, "Campaign pause state changed");
    Ok(Json(DataResponse { data: campaign }))
}

/// GET /my-campaigns
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list_by_owner(&state.pool, &user.email).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /campaigns/{id}/donations
///
/// Donations received by the caller's campaign.
pub async fn list_donations(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_campaign(&state, &user, id).await?;
    let donations = DonationRepo::list_by_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse { data: donations }))
}
