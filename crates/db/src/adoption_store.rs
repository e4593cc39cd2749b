//! PostgreSQL implementation of the coordinator's [`AdoptionStore`].
//!
//! Reads go straight to the pool. The two write paths each run in a single
//! transaction, so the ledger row and the pet flag are committed together or
//! not at all. Accept also locks the pet row so only one request per pet can
//! end up accepted.

use async_trait::async_trait;
use petcare_core::adoption::{
    AcceptOutcome, AdoptionRecord, AdoptionStore, NewAdoptionRecord, PetFilter, PetRecord,
    StoreError,
};
use petcare_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::repositories::adoption_request_repo::UQ_PET_REQUESTER;
use crate::repositories::{AdoptionRequestRepo, PetRepo};

/// Adoption store backed by the `pets` and `adoption_requests` tables.
#[derive(Clone)]
pub struct PgAdoptionStore {
    pool: PgPool,
}

impl PgAdoptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl AdoptionStore for PgAdoptionStore {
    async fn find_pet(
        &self,
        name: &str,
        category: &str,
        owner_email: &str,
    ) -> Result<Option<PetRecord>, StoreError> {
        let pet = PetRepo::find_by_name_category_owner(&self.pool, name, category, owner_email)
            .await
            .map_err(unavailable)?;
        Ok(pet.map(PetRecord::from))
    }

    async fn find_pet_by_id(&self, id: DbId) -> Result<Option<PetRecord>, StoreError> {
        let pet = PetRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?;
        Ok(pet.map(PetRecord::from))
    }

    async fn find_request(
        &self,
        pet_name: &str,
        requester_email: &str,
    ) -> Result<Option<AdoptionRecord>, StoreError> {
        let request =
            AdoptionRequestRepo::find_by_pet_and_requester(&self.pool, pet_name, requester_email)
                .await
                .map_err(unavailable)?;
        Ok(request.map(AdoptionRecord::from))
    }

    async fn find_request_by_id(&self, id: DbId) -> Result<Option<AdoptionRecord>, StoreError> {
        let request = AdoptionRequestRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?;
        Ok(request.map(AdoptionRecord::from))
    }

    async fn record_submission(
        &self,
        new: &NewAdoptionRecord,
        hold_pet: bool,
    ) -> Result<AdoptionRecord, StoreError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        let request = AdoptionRequestRepo::insert_pending(&mut *tx, new)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, UQ_PET_REQUESTER) {
                    StoreError::Duplicate
                } else {
                    unavailable(e)
                }
            })?;

        if hold_pet {
            let held = PetRepo::hold(&mut *tx, new.pet_id)
                .await
                .map_err(unavailable)?;
            if !held {
                tx.rollback().await.map_err(unavailable)?;
                tracing::warn!(
                    pet_id = new.pet_id,
                    requester = %new.requester_email,
                    "Pet already held, adoption request rolled back"
                );
                return Err(StoreError::PetUnavailable { pet_id: new.pet_id });
            }
        }

        tx.commit().await.map_err(unavailable)?;
        Ok(request.into())
    }

    async fn record_acceptance(
        &self,
        request_id: DbId,
        pet_id: DbId,
    ) -> Result<Option<AcceptOutcome>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        // Serializes concurrent accepts for the same pet.
        PetRepo::lock(&mut *tx, pet_id).await.map_err(unavailable)?;
        let taken = AdoptionRequestRepo::accepted_other_exists(&mut *tx, pet_id, request_id)
            .await
            .map_err(unavailable)?;
        if taken {
            tx.rollback().await.map_err(unavailable)?;
            tracing::warn!(
                pet_id,
                request_id,
                "Pet already went to another accepted request"
            );
            return Err(StoreError::PetUnavailable { pet_id });
        }

        let pet_updated = PetRepo::hold(&mut *tx, pet_id).await.map_err(unavailable)?;
        let request_updated = AdoptionRequestRepo::mark_accepted(&mut *tx, request_id)
            .await
            .map_err(unavailable)?;
        let request = AdoptionRequestRepo::find_by_id_in(&mut *tx, request_id)
            .await
            .map_err(unavailable)?;

        let Some(request) = request else {
            tx.rollback().await.map_err(unavailable)?;
            return Ok(None);
        };

        tx.commit().await.map_err(unavailable)?;
        Ok(Some(AcceptOutcome {
            pet_updated,
            request_updated,
            request: request.into(),
        }))
    }

    async fn list_available_pets(&self, filter: &PetFilter) -> Result<Vec<PetRecord>, StoreError> {
        let pets = PetRepo::list_available(&self.pool, filter)
            .await
            .map_err(unavailable)?;
        Ok(pets.into_iter().map(PetRecord::from).collect())
    }

    async fn list_requests_for_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<AdoptionRecord>, StoreError> {
        let requests = AdoptionRequestRepo::list_for_owner(&self.pool, owner_email)
            .await
            .map_err(unavailable)?;
        Ok(requests.into_iter().map(AdoptionRecord::from).collect())
    }

    async fn reconcile_availability(&self, accepted_only: bool) -> Result<u64, StoreError> {
        PetRepo::reconcile_with_ledger(&self.pool, accepted_only)
            .await
            .map_err(unavailable)
    }
}
