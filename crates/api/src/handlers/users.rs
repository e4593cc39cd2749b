//! Handlers for users and access tokens.
//!
//! Sign-in itself happens with the client's identity provider; the server
//! only keeps a user record per email and issues its own access tokens.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::error::CoreError;
use petcare_core::roles::{normalize_email, ROLE_ADMIN};
use petcare_core::types::DbId;
use petcare_db::models::user::CreateUser;
use petcare_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub admin: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /jwt
///
/// Issue an access token for a registered email.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

    let token = generate_access_token(&user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::debug!(email = %user.email, role = %user.role, "Access token issued");
    Ok(Json(TokenResponse { token }))
}

/// POST /users
///
/// Register a user record. Registering an existing email returns the stored
/// record unchanged.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let email = normalize_email(&input.email);

    let (user, created) = UserRepo::create_if_absent(&state.pool, &email, &input).await?;
    if created {
        tracing::info!(user_id = user.id, email = %user.email, "User registered");
        Ok((StatusCode::CREATED, Json(MessageResponse::success(user))))
    } else {
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "user already exists",
                data: user,
            }),
        ))
    }
}

/// GET /users
///
/// List all users (admin only).
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /users/admin/{email}
///
/// Whether the caller's own account has the admin role.
pub async fn admin_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    user.ensure_is(&email)?;
    let email = normalize_email(&email);
    let admin = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .is_some_and(|u| u.role == ROLE_ADMIN);
    Ok(Json(AdminStatus { admin }))
}

/// PATCH /users/admin/{id}
///
/// Promote a user to admin (admin only).
pub async fn promote(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: DbId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid user id '{id}'")))?;

    let user = UserRepo::set_role(&state.pool, id, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;

    tracing::info!(user_id = id, promoted_by = %admin.email, "User promoted to admin");
    Ok(Json(DataResponse { data: user }))
}
