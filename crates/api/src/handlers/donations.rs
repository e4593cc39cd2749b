//! Handlers for the donation ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::error::CoreError;
use petcare_core::types::DbId;
use petcare_db::models::donation::{CreateDonation, DonationOutcome, RefundOutcome};
use petcare_db::repositories::DonationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /donations
///
/// Record a completed payment against a campaign. A replayed
/// `transaction_id` answers 409.
pub async fn record(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDonation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    match DonationRepo::record(&state.pool, &user.email, &input).await? {
        DonationOutcome::Recorded(donation) => {
            tracing::info!(
                donation_id = donation.id,
                campaign_id = donation.campaign_id,
                amount_cents = donation.amount_cents,
                "Donation recorded"
            );
            Ok((StatusCode::CREATED, Json(MessageResponse::success(donation))))
        }
        DonationOutcome::CampaignNotFound => Err(AppError::Core(CoreError::not_found(
            "DonationCampaign",
            input.campaign_id,
        ))),
        DonationOutcome::Rejected(reason) => Err(AppError::Core(CoreError::Validation(reason))),
    }
}

/// GET /my-donations
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let donations = DonationRepo::list_by_donor(&state.pool, &user.email).await?;
    Ok(Json(DataResponse { data: donations }))
}

/// DELETE /donations/{id}
///
/// Refund one of the caller's donations.
pub async fn refund(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    match DonationRepo::refund(&state.pool, id, &user.email).await? {
        RefundOutcome::Refunded(donation) => {
            tracing::info!(
                donation_id = id,
                campaign_id = donation.campaign_id,
                amount_cents = donation.amount_cents,
                "Donation refunded"
            );
            Ok(Json(MessageResponse::success(donation)))
        }
        RefundOutcome::NotFound => Err(AppError::Core(CoreError::not_found("Donation", id))),
        RefundOutcome::NotDonor => Err(AppError::Core(CoreError::Forbidden(
            "Only the donor can refund a donation".into(),
        ))),
    }
}
