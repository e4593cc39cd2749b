//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that take
//! `&mut PgConnection` are building blocks for callers that own a
//! transaction.

pub mod adoption_request_repo;
pub mod campaign_repo;
pub mod donation_repo;
pub mod pet_repo;
pub mod user_repo;

pub use adoption_request_repo::AdoptionRequestRepo;
pub use campaign_repo::CampaignRepo;
pub use donation_repo::DonationRepo;
pub use pet_repo::PetRepo;
pub use user_repo::UserRepo;
