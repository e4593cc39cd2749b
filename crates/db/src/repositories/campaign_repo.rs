//! Repository for the `donation_campaigns` table.

use petcare_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::campaign::{CreateCampaign, DonationCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pet_name, pet_image, max_donation_cents, donated_cents, last_date, \
    short_description, long_description, owner_email, paused, created_at, updated_at";

/// Provides CRUD operations for donation campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign owned by `owner_email`.
    pub async fn create(
        pool: &PgPool,
        owner_email: &str,
        input: &CreateCampaign,
    ) -> Result<DonationCampaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO donation_campaigns \
                (pet_name, pet_image, max_donation_cents, last_date, short_description, \
                 long_description, owner_email) \
             VALUES ($1, COALESCE($2, ''), $3, $4, COALESCE($5, ''), COALESCE($6, ''), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(input.pet_name.trim())
            .bind(&input.pet_image)
            .bind(input.max_donation_cents)
            .bind(input.last_date)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .bind(owner_email)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DonationCampaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donation_campaigns WHERE id = $1");
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a campaign row for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<DonationCampaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donation_campaigns WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List campaigns that are not paused, newest first.
    pub async fn list_active(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_campaigns \
             WHERE paused = false \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every campaign created by `owner_email`, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_email: &str,
    ) -> Result<Vec<DonationCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_campaigns \
             WHERE owner_email = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(owner_email)
            .fetch_all(pool)
            .await
    }

    /// Update a campaign. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<DonationCampaign>, sqlx::Error> {
        let query = format!(
            "UPDATE donation_campaigns SET \
                pet_name = COALESCE($2, pet_name), \
                pet_image = COALESCE($3, pet_image), \
                max_donation_cents = COALESCE($4, max_donation_cents), \
                last_date = COALESCE($5, last_date), \
                short_description = COALESCE($6, short_description), \
                long_description = COALESCE($7, long_description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(id)
            .bind(input.pet_name.as_deref().map(str::trim))
            .bind(&input.pet_image)
            .bind(input.max_donation_cents)
            .bind(input.last_date)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .fetch_optional(pool)
            .await
    }

    /// Pause or resume a campaign.
    pub async fn set_paused(
        pool: &PgPool,
        id: DbId,
        paused: bool,
    ) -> Result<Option<DonationCampaign>, sqlx::Error> {
        let query =
            format!("UPDATE donation_campaigns SET paused = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DonationCampaign>(&query)
            .bind(id)
            .bind(paused)
            .fetch_optional(pool)
            .await
    }

    /// Add (or, with a negative delta, subtract) from the donated total.
    pub async fn add_donated(
        conn: &mut PgConnection,
        id: DbId,
        delta_cents: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE donation_campaigns \
             SET donated_cents = GREATEST(donated_cents + $2, 0) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(delta_cents)
        .execute(conn)
        .await?;
        Ok(())
    }
}
