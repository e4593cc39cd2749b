//! Handler for payment intent creation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use petcare_core::payments::to_minor_units;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    /// Price in major currency units.
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: String,
}

/// POST /create-payment-intent
pub async fn create_intent(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<IntentRequest>,
) -> AppResult<impl IntoResponse> {
    let amount_cents = to_minor_units(input.price)?;
    let intent = state
        .payments
        .create_intent(amount_cents, &state.config.payment.currency)
        .await?;

    tracing::info!(
        intent_id = %intent.id,
        amount_cents,
        payer = %user.email,
        "Payment intent issued"
    );
    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}
