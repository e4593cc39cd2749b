//! Adoption request lifecycle.
//!
//! The registry (pets) and the ledger (adoption requests) are two separate
//! tables. [`AdoptionCoordinator`] is the only component that writes to both
//! in one operation, and it does so through an injected [`AdoptionStore`].
//!
//! - [`model`] -- record types and request DTOs.
//! - [`store`] -- the storage trait and its error type.
//! - [`coordinator`] -- submit / accept / list / reconcile workflows.
//! - [`memory`] -- an in-process store with the same write semantics.

pub mod coordinator;
pub mod memory;
pub mod model;
pub mod store;

use std::fmt;
use std::str::FromStr;

pub use coordinator::AdoptionCoordinator;
pub use model::{
    AcceptOutcome, AdoptionRecord, NewAdoptionRecord, PetFilter, PetRecord, SubmitAdoption,
};
pub use store::{AdoptionStore, StoreError};

/// Request recorded, waiting for the owner's decision.
pub const STATUS_PENDING: &str = "pending";

/// Owner accepted the request.
pub const STATUS_ACCEPTED: &str = "accepted";

/// All valid request status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_ACCEPTED];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid adoption status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

/// When a pet stops being listed as available.
///
/// `OnSubmit` holds the pet as soon as any request is recorded, so at most one
/// request per pet is ever open. `OnAccept` keeps the pet listed until the
/// owner accepts one of possibly several requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldPolicy {
    #[default]
    OnSubmit,
    OnAccept,
}

impl HoldPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            HoldPolicy::OnSubmit => "on_submit",
            HoldPolicy::OnAccept => "on_accept",
        }
    }

    /// Whether a submit must flip the pet's availability flag.
    pub fn holds_on_submit(self) -> bool {
        self == HoldPolicy::OnSubmit
    }
}

impl fmt::Display for HoldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_submit" => Ok(HoldPolicy::OnSubmit),
            "on_accept" => Ok(HoldPolicy::OnAccept),
            other => Err(format!(
                "Invalid hold policy '{other}'. Must be one of: on_submit, on_accept"
            )),
        }
    }
}
