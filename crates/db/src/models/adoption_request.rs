//! Adoption request (ledger) row model.
//!
//! Requests are created only through the adoption coordinator, so there is
//! no create DTO here; see `petcare_core::adoption::SubmitAdoption`.

use petcare_core::adoption::AdoptionRecord;
use petcare_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `adoption_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub pet_id: DbId,
    pub pet_name: String,
    pub pet_category: String,
    pub pet_image: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    pub requester_address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub requested_on: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AdoptionRequest> for AdoptionRecord {
    fn from(row: AdoptionRequest) -> Self {
        AdoptionRecord {
            id: row.id,
            pet_id: row.pet_id,
            pet_name: row.pet_name,
            pet_category: row.pet_category,
            pet_image: row.pet_image,
            requester_name: row.requester_name,
            requester_email: row.requester_email,
            requester_phone: row.requester_phone,
            requester_address: row.requester_address,
            owner_name: row.owner_name,
            owner_email: row.owner_email,
            requested_on: row.requested_on,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
