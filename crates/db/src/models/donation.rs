//! Donation entity model and DTOs.

use petcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub campaign_id: DbId,
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

/// DTO for recording a completed payment against a campaign.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDonation {
    pub campaign_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub donor_name: String,
    pub amount_cents: i64,
    /// Provider transaction / payment intent id. Unique per donation.
    #[validate(length(min = 1, max = 255))]
    pub transaction_id: String,
}

/// Result of trying to record a donation.
#[derive(Debug)]
pub enum DonationOutcome {
    Recorded(Donation),
    CampaignNotFound,
    /// The campaign's rules refused the donation.
    Rejected(String),
}

/// Result of a refund (donation removal).
#[derive(Debug)]
pub enum RefundOutcome {
    Refunded(Donation),
    NotFound,
    NotDonor,
}
