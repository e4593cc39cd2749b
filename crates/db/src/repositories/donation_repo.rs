//! Repository for the `donations` table.
//!
//! Recording and refunding a donation both touch the campaign's running
//! total, so those two paths run in a transaction that locks the campaign
//! row first.

use chrono::Utc;
use petcare_core::donation::validate_donation;
use petcare_core::types::DbId;
use sqlx::PgPool;

use crate::models::donation::{CreateDonation, Donation, DonationOutcome, RefundOutcome};
use crate::repositories::CampaignRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, campaign_id, donor_name, donor_email, amount_cents, transaction_id, created_at";

/// Unique constraint guarding one donation per provider transaction.
pub const UQ_TRANSACTION_ID: &str = "uq_donations_transaction_id";

/// Provides donation ledger operations.
pub struct DonationRepo;

impl DonationRepo {
    /// Record a donation from `donor_email` and add it to the campaign total.
    ///
    /// A replayed `transaction_id` surfaces as a unique violation on
    /// [`UQ_TRANSACTION_ID`].
    pub async fn record(
        pool: &PgPool,
        donor_email: &str,
        input: &CreateDonation,
    ) -> Result<DonationOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(campaign) = CampaignRepo::find_for_update(&mut *tx, input.campaign_id).await?
        else {
            return Ok(DonationOutcome::CampaignNotFound);
        };

        let today = Utc::now().date_naive();
        if let Err(reason) = validate_donation(&campaign.state(), input.amount_cents, today) {
            tx.rollback().await?;
            return Ok(DonationOutcome::Rejected(reason));
        }

        let query = format!(
            "INSERT INTO donations \
                (campaign_id, donor_name, donor_email, amount_cents, transaction_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let donation = sqlx::query_as::<_, Donation>(&query)
            .bind(input.campaign_id)
            .bind(input.donor_name.trim())
            .bind(donor_email)
            .bind(input.amount_cents)
            .bind(input.transaction_id.trim())
            .fetch_one(&mut *tx)
            .await?;

        CampaignRepo::add_donated(&mut *tx, input.campaign_id, input.amount_cents).await?;
        tx.commit().await?;

        Ok(DonationOutcome::Recorded(donation))
    }

    /// Find a donation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a donor's donations, newest first.
    pub async fn list_by_donor(
        pool: &PgPool,
        donor_email: &str,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations \
             WHERE donor_email = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(donor_email)
            .fetch_all(pool)
            .await
    }

    /// List the donations made to a campaign, newest first.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations \
             WHERE campaign_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a donation and subtract it from the campaign total.
    ///
    /// Only the original donor may refund.
    pub async fn refund(
        pool: &PgPool,
        id: DbId,
        donor_email: &str,
    ) -> Result<RefundOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1 FOR UPDATE");
        let Some(donation) = sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(RefundOutcome::NotFound);
        };

        if donation.donor_email != donor_email {
            tx.rollback().await?;
            return Ok(RefundOutcome::NotDonor);
        }

        // Lock the campaign before touching its total.
        CampaignRepo::find_for_update(&mut *tx, donation.campaign_id).await?;

        sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        CampaignRepo::add_donated(&mut *tx, donation.campaign_id, -donation.amount_cents).await?;
        tx.commit().await?;

        Ok(RefundOutcome::Refunded(donation))
    }
}
