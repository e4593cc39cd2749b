//! In-process [`AdoptionStore`].
//!
//! Mirrors the PostgreSQL store's write semantics (uniqueness on
//! `(pet_name, requester_email)`, all-or-nothing submissions, conditional
//! flag and status updates) so the coordinator can be exercised without a
//! database. Also supports injected latency and outages.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::model::{AcceptOutcome, AdoptionRecord, NewAdoptionRecord, PetFilter, PetRecord};
use super::store::{AdoptionStore, StoreError};
use super::{STATUS_ACCEPTED, STATUS_PENDING};
use crate::types::DbId;

#[derive(Default)]
struct MemoryState {
    pets: Vec<PetRecord>,
    requests: Vec<AdoptionRecord>,
    next_pet_id: DbId,
    next_request_id: DbId,
    offline: bool,
    latency: Option<Duration>,
}

#[derive(Default)]
pub struct MemoryAdoptionStore {
    state: Mutex<MemoryState>,
}

impl MemoryAdoptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pet to the registry. An `id` of `0` is replaced by the next id.
    pub fn insert_pet(&self, mut pet: PetRecord) -> PetRecord {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if pet.id == 0 {
            state.next_pet_id += 1;
            pet.id = state.next_pet_id;
        } else {
            state.next_pet_id = state.next_pet_id.max(pet.id);
        }
        state.pets.push(pet.clone());
        pet
    }

    /// Write a ledger row directly, bypassing the coordinator.
    pub fn insert_request_unchecked(&self, new: &NewAdoptionRecord, status: &str) -> AdoptionRecord {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        push_request(&mut state, new, status)
    }

    pub fn pet(&self, id: DbId) -> Option<PetRecord> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.pets.iter().find(|p| p.id == id).cloned()
    }

    pub fn requests(&self) -> Vec<AdoptionRecord> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.requests.clone()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.offline = offline;
    }

    /// Delay every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.latency = latency;
    }

    /// Apply injected latency, then lock the state unless offline.
    async fn enter(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        let latency = {
            let state = self.lock()?;
            state.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let state = self.lock()?;
        if state.offline {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(state)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

fn push_request(state: &mut MemoryState, new: &NewAdoptionRecord, status: &str) -> AdoptionRecord {
    state.next_request_id += 1;
    let now = Utc::now();
    let record = AdoptionRecord {
        id: state.next_request_id,
        pet_id: new.pet_id,
        pet_name: new.pet_name.clone(),
        pet_category: new.pet_category.clone(),
        pet_image: new.pet_image.clone(),
        requester_name: new.requester_name.clone(),
        requester_email: new.requester_email.clone(),
        requester_phone: new.requester_phone.clone(),
        requester_address: new.requester_address.clone(),
        owner_name: new.owner_name.clone(),
        owner_email: new.owner_email.clone(),
        requested_on: new.requested_on.clone(),
        status: status.to_string(),
        created_at: now,
        updated_at: now,
    };
    state.requests.push(record.clone());
    record
}

#[async_trait]
impl AdoptionStore for MemoryAdoptionStore {
    async fn find_pet(
        &self,
        name: &str,
        category: &str,
        owner_email: &str,
    ) -> Result<Option<PetRecord>, StoreError> {
        let state = self.enter().await?;
        Ok(state
            .pets
            .iter()
            .filter(|p| p.name == name && p.category == category && p.owner_email == owner_email)
            .min_by_key(|p| (p.adopted, -p.id))
            .cloned())
    }

    async fn find_pet_by_id(&self, id: DbId) -> Result<Option<PetRecord>, StoreError> {
        let state = self.enter().await?;
        Ok(state.pets.iter().find(|p| p.id == id).cloned())
    }

    async fn find_request(
        &self,
        pet_name: &str,
        requester_email: &str,
    ) -> Result<Option<AdoptionRecord>, StoreError> {
        let state = self.enter().await?;
        Ok(state
            .requests
            .iter()
            .find(|r| r.pet_name == pet_name && r.requester_email == requester_email)
            .cloned())
    }

    async fn find_request_by_id(&self, id: DbId) -> Result<Option<AdoptionRecord>, StoreError> {
        let state = self.enter().await?;
        Ok(state.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn record_submission(
        &self,
        new: &NewAdoptionRecord,
        hold_pet: bool,
    ) -> Result<AdoptionRecord, StoreError> {
        let mut state = self.enter().await?;

        let duplicate = state
            .requests
            .iter()
            .any(|r| r.pet_name == new.pet_name && r.requester_email == new.requester_email);
        if duplicate {
            return Err(StoreError::Duplicate);
        }

        if hold_pet {
            let pet = state
                .pets
                .iter_mut()
                .find(|p| p.id == new.pet_id && !p.adopted)
                .ok_or(StoreError::PetUnavailable { pet_id: new.pet_id })?;
            pet.adopted = true;
        }

        Ok(push_request(&mut state, new, STATUS_PENDING))
    }

    async fn record_acceptance(
        &self,
        request_id: DbId,
        pet_id: DbId,
    ) -> Result<Option<AcceptOutcome>, StoreError> {
        let mut state = self.enter().await?;

        let Some(index) = state.requests.iter().position(|r| r.id == request_id) else {
            return Ok(None);
        };

        let taken = state
            .requests
            .iter()
            .any(|r| r.pet_id == pet_id && r.id != request_id && r.status == STATUS_ACCEPTED);
        if taken {
            return Err(StoreError::PetUnavailable { pet_id });
        }

        let pet_updated = match state.pets.iter_mut().find(|p| p.id == pet_id && !p.adopted) {
            Some(pet) => {
                pet.adopted = true;
                true
            }
            None => false,
        };

        let request = &mut state.requests[index];
        let request_updated = request.status != STATUS_ACCEPTED;
        if request_updated {
            request.status = STATUS_ACCEPTED.to_string();
            request.updated_at = Utc::now();
        }

        Ok(Some(AcceptOutcome {
            pet_updated,
            request_updated,
            request: request.clone(),
        }))
    }

    async fn list_available_pets(&self, filter: &PetFilter) -> Result<Vec<PetRecord>, StoreError> {
        let state = self.enter().await?;
        let mut pets: Vec<PetRecord> = state
            .pets
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        pets.sort_by(|a, b| {
            b.adoption_date
                .cmp(&a.adoption_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(pets
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn list_requests_for_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<AdoptionRecord>, StoreError> {
        let state = self.enter().await?;
        let mut requests: Vec<AdoptionRecord> = state
            .requests
            .iter()
            .filter(|r| r.owner_email == owner_email)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(requests)
    }

    async fn reconcile_availability(&self, accepted_only: bool) -> Result<u64, StoreError> {
        let mut state = self.enter().await?;
        let MemoryState { pets, requests, .. } = &mut *state;

        let mut fixed = 0;
        for pet in pets.iter_mut().filter(|p| !p.adopted) {
            let held = requests.iter().any(|r| {
                r.pet_id == pet.id && (!accepted_only || r.status == STATUS_ACCEPTED)
            });
            if held {
                pet.adopted = true;
                fixed += 1;
            }
        }
        Ok(fixed)
    }
}
