//! Repository for the `users` table.

use petcare_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, photo_url, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user unless the email is already registered.
    ///
    /// Returns the row and whether it was newly created.
    pub async fn create_if_absent(
        pool: &PgPool,
        email: &str,
        input: &CreateUser,
    ) -> Result<(User, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, photo_url) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_users_email DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(input.name.trim())
            .bind(email)
            .bind(&input.photo_url)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(user) => Ok((user, true)),
            None => {
                let existing = Self::find_by_email(pool, email)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Find a user by email (already normalized by the caller).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Change a user's role.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_role(pool: &PgPool, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}
