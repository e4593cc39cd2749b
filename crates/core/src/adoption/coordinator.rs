//! Adoption request coordinator.
//!
//! Mediates between the pet registry and the adoption ledger:
//!
//! - a requester may hold at most one request per pet name;
//! - a pet becomes unavailable only together with a recorded request
//!   (on submit or on accept, depending on [`HoldPolicy`]).
//!
//! Each operation is two or three sequential store round trips with no
//! cross-request locking. The duplicate pre-check is backed by a uniqueness
//! constraint in the store, so concurrent duplicates surface as
//! [`CoreError::DuplicateRequest`] instead of a second ledger row.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use super::model::{
    AcceptOutcome, AdoptionRecord, NewAdoptionRecord, PetFilter, PetRecord, SubmitAdoption,
};
use super::store::{AdoptionStore, StoreError};
use super::HoldPolicy;
use crate::error::CoreError;
use crate::roles::{normalize_email, same_identity};
use crate::types::DbId;

/// Default bound on a single store round trip.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AdoptionCoordinator {
    store: Arc<dyn AdoptionStore>,
    policy: HoldPolicy,
    io_timeout: Duration,
}

impl AdoptionCoordinator {
    pub fn new(store: Arc<dyn AdoptionStore>, policy: HoldPolicy, io_timeout: Duration) -> Self {
        Self {
            store,
            policy,
            io_timeout,
        }
    }

    pub fn policy(&self) -> HoldPolicy {
        self.policy
    }

    /// Record a new adoption request.
    ///
    /// Fails with [`CoreError::DuplicateRequest`] when the requester already
    /// asked for a pet with this name; in that case nothing is written.
    pub async fn submit(&self, input: SubmitAdoption) -> Result<AdoptionRecord, CoreError> {
        let input = input.normalized();
        input.validate()?;

        if same_identity(&input.owner_email, &input.requester_email) {
            return Err(CoreError::Validation(
                "Owners cannot request adoption of their own pet".into(),
            ));
        }

        let existing = self
            .call(
                "find_request",
                self.store
                    .find_request(&input.pet_name, &input.requester_email),
            )
            .await?;
        if existing.is_some() {
            tracing::info!(
                pet_name = %input.pet_name,
                requester = %input.requester_email,
                "Duplicate adoption request rejected"
            );
            return Err(duplicate(&input));
        }

        let pet = self
            .call(
                "find_pet",
                self.store
                    .find_pet(&input.pet_name, &input.pet_category, &input.owner_email),
            )
            .await?
            .ok_or_else(|| CoreError::not_found("Pet", &input.pet_name))?;

        if !pet.is_available() {
            return Err(CoreError::Conflict(format!(
                "Pet '{}' is no longer available",
                pet.name
            )));
        }

        let new = NewAdoptionRecord::new(input.clone(), &pet);
        let hold_pet = self.policy.holds_on_submit();

        let record = self
            .call(
                "record_submission",
                self.store.record_submission(&new, hold_pet),
            )
            .await
            .map_err(|e| match e {
                StoreError::Duplicate => duplicate(&input),
                other => other.into(),
            })?;

        tracing::info!(
            request_id = record.id,
            pet_id = pet.id,
            requester = %record.requester_email,
            policy = %self.policy,
            "Adoption request recorded"
        );

        Ok(record)
    }

    /// Accept a request on behalf of the pet's owner.
    ///
    /// `pet_name` and `owner_email` must match the request, which names the
    /// exact pet it was made for; that pet is the one marked unavailable.
    /// Calling this again for an accepted request succeeds and reports that
    /// neither write changed anything. Accepting a second request for a pet
    /// that already went to someone else is a [`CoreError::Conflict`].
    pub async fn accept(
        &self,
        request_id: DbId,
        pet_name: &str,
        owner_email: &str,
    ) -> Result<AcceptOutcome, CoreError> {
        let pet_name = pet_name.trim();
        let owner_email = normalize_email(owner_email);
        if pet_name.is_empty() || owner_email.is_empty() {
            return Err(CoreError::Validation(
                "Pet name and owner email are required".into(),
            ));
        }

        let request = self
            .call("find_request_by_id", self.store.find_request_by_id(request_id))
            .await?
            .ok_or_else(|| CoreError::not_found("AdoptionRequest", request_id))?;

        if request.pet_name != pet_name || !same_identity(&request.owner_email, &owner_email) {
            return Err(CoreError::Validation(format!(
                "Adoption request {request_id} does not target pet '{pet_name}' of {owner_email}"
            )));
        }

        // The registry row may have been renamed since; the id is authoritative.
        let pet = self
            .call("find_pet_by_id", self.store.find_pet_by_id(request.pet_id))
            .await?
            .filter(|p| same_identity(&p.owner_email, &owner_email))
            .ok_or_else(|| CoreError::not_found("Pet", pet_name))?;

        let outcome = self
            .call(
                "record_acceptance",
                self.store.record_acceptance(request_id, pet.id),
            )
            .await
            .map_err(|e| match e {
                StoreError::PetUnavailable { .. } => CoreError::Conflict(format!(
                    "Pet '{pet_name}' was already adopted through another request"
                )),
                other => other.into(),
            })?
            .ok_or_else(|| CoreError::not_found("AdoptionRequest", request_id))?;

        tracing::info!(
            request_id,
            pet_id = pet.id,
            pet_updated = outcome.pet_updated,
            request_updated = outcome.request_updated,
            "Adoption request accepted"
        );

        Ok(outcome)
    }

    /// Browse available pets.
    pub async fn list(&self, filter: &PetFilter) -> Result<Vec<PetRecord>, CoreError> {
        Ok(self
            .call("list_available_pets", self.store.list_available_pets(filter))
            .await?)
    }

    /// Requests targeting pets owned by `owner_email`.
    pub async fn requests_for_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<AdoptionRecord>, CoreError> {
        let owner_email = normalize_email(owner_email);
        Ok(self
            .call(
                "list_requests_for_owner",
                self.store.list_requests_for_owner(&owner_email),
            )
            .await?)
    }

    /// Re-derive pet availability from the ledger.
    ///
    /// Repairs pets that stayed available even though a request that should
    /// hold them exists. Returns the number of pets changed.
    pub async fn reconcile(&self) -> Result<u64, CoreError> {
        let accepted_only = !self.policy.holds_on_submit();
        let fixed = self
            .call(
                "reconcile_availability",
                self.store.reconcile_availability(accepted_only),
            )
            .await?;
        if fixed > 0 {
            tracing::warn!(fixed, policy = %self.policy, "Reconciled pet availability");
        }
        Ok(fixed)
    }

    /// Run one store round trip under the configured timeout.
    ///
    /// A timeout is reported as [`StoreError::Unavailable`].
    async fn call<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.io_timeout, fut).await {
            Ok(Err(StoreError::Unavailable(msg))) => {
                tracing::error!(op, error = %msg, "Adoption store call failed");
                Err(StoreError::Unavailable(msg))
            }
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    op,
                    timeout_ms = self.io_timeout.as_millis() as u64,
                    "Adoption store call timed out"
                );
                Err(StoreError::Unavailable(format!("{op} timed out")))
            }
        }
    }
}

fn duplicate(input: &SubmitAdoption) -> CoreError {
    CoreError::DuplicateRequest {
        pet_name: input.pet_name.clone(),
        requester_email: input.requester_email.clone(),
    }
}
