//! Repository for the `adoption_requests` table (the ledger).

use petcare_core::adoption::{NewAdoptionRecord, STATUS_ACCEPTED, STATUS_PENDING};
use petcare_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::adoption_request::AdoptionRequest;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pet_id, pet_name, pet_category, pet_image, requester_name, \
    requester_email, requester_phone, requester_address, owner_name, owner_email, \
    requested_on, status, created_at, updated_at";

/// Unique constraint guarding one request per (pet name, requester).
pub const UQ_PET_REQUESTER: &str = "uq_adoption_requests_pet_requester";

/// Provides ledger reads and the writes used by the adoption store.
pub struct AdoptionRequestRepo;

impl AdoptionRequestRepo {
    /// Insert a pending request.
    pub async fn insert_pending(
        conn: &mut PgConnection,
        new: &NewAdoptionRecord,
    ) -> Result<AdoptionRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoption_requests \
                (pet_id, pet_name, pet_category, pet_image, requester_name, requester_email, \
                 requester_phone, requester_address, owner_name, owner_email, requested_on, \
                 status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(new.pet_id)
            .bind(&new.pet_name)
            .bind(&new.pet_category)
            .bind(&new.pet_image)
            .bind(&new.requester_name)
            .bind(&new.requester_email)
            .bind(&new.requester_phone)
            .bind(&new.requester_address)
            .bind(&new.owner_name)
            .bind(&new.owner_email)
            .bind(&new.requested_on)
            .bind(STATUS_PENDING)
            .fetch_one(conn)
            .await
    }

    /// Find a request by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests WHERE id = $1");
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the request a requester made for a pet name, if any.
    pub async fn find_by_pet_and_requester(
        pool: &PgPool,
        pet_name: &str,
        requester_email: &str,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adoption_requests \
             WHERE pet_name = $1 AND requester_email = $2"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(pet_name)
            .bind(requester_email)
            .fetch_optional(pool)
            .await
    }

    /// List requests targeting an owner's pets, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_email: &str,
    ) -> Result<Vec<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adoption_requests \
             WHERE owner_email = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(owner_email)
            .fetch_all(pool)
            .await
    }

    /// Move a request to `accepted`. Returns whether the status changed.
    pub async fn mark_accepted(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE adoption_requests SET status = $2 WHERE id = $1 AND status <> $2",
        )
        .bind(id)
        .bind(STATUS_ACCEPTED)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a request other than `request_id` was already accepted for
    /// the pet.
    pub async fn accepted_other_exists(
        conn: &mut PgConnection,
        pet_id: DbId,
        request_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                 SELECT 1 FROM adoption_requests \
                 WHERE pet_id = $1 AND id <> $2 AND status = $3 \
             )",
        )
        .bind(pet_id)
        .bind(request_id)
        .bind(STATUS_ACCEPTED)
        .fetch_one(conn)
        .await
    }

    /// Re-read a request inside a transaction.
    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests WHERE id = $1");
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
