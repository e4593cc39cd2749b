//! Repository for the `pets` table (the registry).

use petcare_core::adoption::PetFilter;
use petcare_core::search::substring_pattern;
use petcare_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::pet::{CreatePet, Pet, UpdatePet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, image, age, location, short_description, \
    long_description, owner_name, owner_email, adopted, adoption_date, created_at, updated_at";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet owned by `owner_email`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_name: &str,
        owner_email: &str,
        input: &CreatePet,
    ) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "INSERT INTO pets \
                (name, category, image, age, location, short_description, long_description, \
                 owner_name, owner_email) \
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, ''), COALESCE($6, ''), \
                     COALESCE($7, ''), $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .bind(&input.image)
            .bind(input.age)
            .bind(&input.location)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .bind(owner_name)
            .bind(owner_email)
            .fetch_one(pool)
            .await
    }

    /// Find a pet by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a pet by name, category and owner. Available rows win, then the
    /// most recently created.
    pub async fn find_by_name_category_owner(
        pool: &PgPool,
        name: &str,
        category: &str,
        owner_email: &str,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets \
             WHERE name = $1 AND category = $2 AND owner_email = $3 \
             ORDER BY adopted ASC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(name)
            .bind(category)
            .bind(owner_email)
            .fetch_optional(pool)
            .await
    }

    /// List available pets matching `filter`, newest `adoption_date` first.
    pub async fn list_available(pool: &PgPool, filter: &PetFilter) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets \
             WHERE adopted = false \
               AND ($1::TEXT IS NULL OR category = $1) \
               AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\\') \
             ORDER BY adoption_date DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(&filter.category)
            .bind(filter.search.as_deref().map(substring_pattern))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// List every pet owned by `owner_email`, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_email: &str) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets WHERE owner_email = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(owner_email)
            .fetch_all(pool)
            .await
    }

    /// Update a pet. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePet,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET \
                name = COALESCE($2, name), \
                category = COALESCE($3, category), \
                image = COALESCE($4, image), \
                age = COALESCE($5, age), \
                location = COALESCE($6, location), \
                short_description = COALESCE($7, short_description), \
                long_description = COALESCE($8, long_description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.category.as_deref().map(str::trim))
            .bind(&input.image)
            .bind(input.age)
            .bind(&input.location)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .fetch_optional(pool)
            .await
    }

    /// Set the availability flag directly (owner action). Marking a pet
    /// adopted also stamps `adoption_date`.
    pub async fn set_adopted(
        pool: &PgPool,
        id: DbId,
        adopted: bool,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET \
                adopted = $2, \
                adoption_date = CASE WHEN $2 AND NOT adopted THEN NOW() ELSE adoption_date END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(adopted)
            .fetch_optional(pool)
            .await
    }

    /// Put a pet back on the list, unless a ledger row still holds it (any
    /// request, or only accepted ones when `accepted_only`).
    ///
    /// Returns `None` when the pet does not exist or is still held.
    pub async fn release(
        pool: &PgPool,
        id: DbId,
        accepted_only: bool,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET adopted = false \
             WHERE id = $1 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM adoption_requests r \
                   WHERE r.pet_id = pets.id \
                     AND (NOT $2 OR r.status = 'accepted') \
               ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(accepted_only)
            .fetch_optional(pool)
            .await
    }

    /// Delete a pet. Its adoption requests are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Take a row lock on a pet for the rest of the transaction.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT id FROM pets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(())
    }

    /// Flip an available pet to unavailable. Returns whether a row changed.
    pub async fn hold(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pets SET adopted = true WHERE id = $1 AND adopted = false")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark unavailable every available pet referenced by a ledger row
    /// (only `accepted` rows when `accepted_only`). Returns rows changed.
    pub async fn reconcile_with_ledger(
        pool: &PgPool,
        accepted_only: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pets SET adopted = true \
             WHERE adopted = false \
               AND EXISTS ( \
                   SELECT 1 FROM adoption_requests r \
                   WHERE r.pet_id = pets.id \
                     AND (NOT $1 OR r.status = 'accepted') \
               )",
        )
        .bind(accepted_only)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
