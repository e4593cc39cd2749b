//! Storage seam for the adoption coordinator.

use async_trait::async_trait;

use super::model::{AcceptOutcome, AdoptionRecord, NewAdoptionRecord, PetFilter, PetRecord};
use crate::error::CoreError;
use crate::types::DbId;

/// Failures a store can report to the coordinator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The ledger already holds a request for this (pet name, requester).
    #[error("duplicate adoption request")]
    Duplicate,

    /// The pet's availability flag could not be flipped (already held).
    #[error("pet {pet_id} is no longer available")]
    PetUnavailable { pet_id: DbId },

    /// The backing store could not be reached or failed the operation.
    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => CoreError::Conflict("Duplicate adoption request".into()),
            StoreError::PetUnavailable { pet_id } => {
                CoreError::Conflict(format!("Pet {pet_id} is no longer available"))
            }
            StoreError::Unavailable(msg) => CoreError::StoreUnavailable(msg),
        }
    }
}

/// Registry + ledger operations needed by the coordinator.
///
/// Every method is a single round trip. The two write methods are units of
/// work: an implementation must apply all of their changes or none.
#[async_trait]
pub trait AdoptionStore: Send + Sync {
    /// Find a pet by name, category and owner.
    async fn find_pet(
        &self,
        name: &str,
        category: &str,
        owner_email: &str,
    ) -> Result<Option<PetRecord>, StoreError>;

    async fn find_pet_by_id(&self, id: DbId) -> Result<Option<PetRecord>, StoreError>;

    /// Find the ledger entry for (pet name, requester email), if any.
    async fn find_request(
        &self,
        pet_name: &str,
        requester_email: &str,
    ) -> Result<Option<AdoptionRecord>, StoreError>;

    async fn find_request_by_id(&self, id: DbId) -> Result<Option<AdoptionRecord>, StoreError>;

    /// Insert a pending request. When `hold_pet` is set, also flip the pet's
    /// flag; if no available pet row was modified, nothing is written and
    /// [`StoreError::PetUnavailable`] is returned. A uniqueness violation on
    /// (pet name, requester email) is [`StoreError::Duplicate`].
    async fn record_submission(
        &self,
        new: &NewAdoptionRecord,
        hold_pet: bool,
    ) -> Result<AdoptionRecord, StoreError>;

    /// Mark the pet unavailable and the request accepted. Writes that find
    /// nothing to change are reported as `false`, not as errors.
    ///
    /// When another request for the same pet is already accepted, nothing is
    /// written and [`StoreError::PetUnavailable`] is returned.
    async fn record_acceptance(
        &self,
        request_id: DbId,
        pet_id: DbId,
    ) -> Result<Option<AcceptOutcome>, StoreError>;

    /// Available pets matching `filter`, newest `adoption_date` first.
    async fn list_available_pets(&self, filter: &PetFilter) -> Result<Vec<PetRecord>, StoreError>;

    /// Requests targeting pets of `owner_email`, newest first.
    async fn list_requests_for_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<AdoptionRecord>, StoreError>;

    /// Mark unavailable every available pet referenced by a request that
    /// should hold it (any request, or only accepted ones when
    /// `accepted_only`). Returns the number of pets changed.
    async fn reconcile_availability(&self, accepted_only: bool) -> Result<u64, StoreError>;
}
