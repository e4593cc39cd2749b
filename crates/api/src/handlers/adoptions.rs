//! Handlers for adoption requests.
//!
//! Thin wrappers over [`AdoptionCoordinator`]: they bind the caller's
//! identity to the request and translate results into the HTTP envelope.
//!
//! [`AdoptionCoordinator`]: petcare_core::adoption::AdoptionCoordinator

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::adoption::SubmitAdoption;
use petcare_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `PATCH /adoptions`.
#[derive(Debug, Deserialize)]
pub struct AcceptParams {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "masterEmail")]
    pub master_email: String,
}

#[derive(Debug, Serialize)]
pub struct ReconcileReport {
    pub pets_updated: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /adoptions
///
/// Submit an adoption request as the caller. A repeat request for the same
/// pet answers 409 with `"message": "failed"`.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<SubmitAdoption>,
) -> AppResult<impl IntoResponse> {
    input.requester_email = user.email;
    let request = state.adoptions.submit(input).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::success(request))))
}

/// PATCH /adoptions?id=&name=&masterEmail=
///
/// Accept a request for one of the caller's pets.
pub async fn accept(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AcceptParams>,
) -> AppResult<impl IntoResponse> {
    user.ensure_is(&params.master_email)?;
    let outcome = state
        .adoptions
        .accept(params.id, &params.name, &params.master_email)
        .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /adoptions/{email}
///
/// Requests targeting the caller's pets, newest first.
pub async fn list_for_owner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    user.ensure_is(&email)?;
    let requests = state.adoptions.requests_for_owner(&email).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /adoptions/reconcile
///
/// Re-derive pet availability from the request ledger (admin only).
pub async fn reconcile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let pets_updated = state.adoptions.reconcile().await?;
    tracing::info!(pets_updated, requested_by = %admin.email, "Manual availability reconcile");
    Ok(Json(DataResponse {
        data: ReconcileReport { pets_updated },
    }))
}
