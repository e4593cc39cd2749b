//! Pet Care domain core.
//!
//! Pure domain logic shared by the database and API layers: identifiers,
//! error taxonomy, validation rules, and the adoption request coordinator.
//! Nothing in here talks to PostgreSQL directly; storage is reached through
//! the [`adoption::AdoptionStore`] trait.

pub mod adoption;
pub mod donation;
pub mod error;
pub mod payments;
pub mod roles;
pub mod search;
pub mod types;
