//! PostgreSQL persistence for the Pet Care server.
//!
//! - [`models`] -- row structs and DTOs.
//! - [`repositories`] -- zero-sized repos with async query methods.
//! - [`adoption_store`] -- the coordinator's [`AdoptionStore`] over Postgres.
//!
//! [`AdoptionStore`]: petcare_core::adoption::AdoptionStore

use sqlx::postgres::PgPoolOptions;

pub mod adoption_store;
pub mod models;
pub mod repositories;

pub use adoption_store::PgAdoptionStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Whether `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
