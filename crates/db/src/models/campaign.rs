//! Donation campaign entity model and DTOs.

use chrono::NaiveDate;
use petcare_core::donation::CampaignState;
use petcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `donation_campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonationCampaign {
    pub id: DbId,
    pub pet_name: String,
    pub pet_image: String,
    pub max_donation_cents: i64,
    pub donated_cents: i64,
    pub last_date: NaiveDate,
    pub short_description: String,
    pub long_description: String,
    pub owner_email: String,
    pub paused: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DonationCampaign {
    pub fn state(&self) -> CampaignState {
        CampaignState {
            max_donation_cents: self.max_donation_cents,
            donated_cents: self.donated_cents,
            paused: self.paused,
            last_date: self.last_date,
        }
    }
}

/// DTO for creating a campaign. The owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 100))]
    pub pet_name: String,
    #[validate(url)]
    pub pet_image: Option<String>,
    pub max_donation_cents: i64,
    pub last_date: NaiveDate,
    #[validate(length(max = 300))]
    pub short_description: Option<String>,
    #[validate(length(max = 5000))]
    pub long_description: Option<String>,
}

/// DTO for updating a campaign. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 100))]
    pub pet_name: Option<String>,
    #[validate(url)]
    pub pet_image: Option<String>,
    pub max_donation_cents: Option<i64>,
    pub last_date: Option<NaiveDate>,
    #[validate(length(max = 300))]
    pub short_description: Option<String>,
    #[validate(length(max = 5000))]
    pub long_description: Option<String>,
}
