//! Records exchanged between the coordinator and its store.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::roles::normalize_email;
use crate::search::{clamp_limit, clamp_offset, contains_ignore_case, normalize_term};
use crate::search::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::types::{DbId, Timestamp};

/// The registry's view of a pet, as far as adoption is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub owner_name: String,
    pub owner_email: String,
    /// `true` once the pet is held by a request or adopted.
    pub adopted: bool,
    pub adoption_date: Timestamp,
}

impl PetRecord {
    pub fn is_available(&self) -> bool {
        !self.adopted
    }
}

/// A row in the adoption ledger.
///
/// Pet fields are a snapshot taken when the request was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionRecord {
    pub id: DbId,
    pub pet_id: DbId,
    pub pet_name: String,
    pub pet_category: String,
    pub pet_image: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    pub requester_address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub requested_on: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Incoming adoption request, validated before the coordinator runs.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAdoption {
    #[validate(length(min = 1, max = 100))]
    pub pet_name: String,
    #[validate(length(min = 1, max = 50))]
    pub pet_category: String,
    #[validate(length(min = 1, max = 100))]
    pub owner_name: String,
    #[validate(email)]
    pub owner_email: String,
    #[validate(length(min = 1, max = 100))]
    pub requester_name: String,
    /// Filled from the caller's identity at the HTTP boundary.
    #[serde(default)]
    #[validate(email)]
    pub requester_email: String,
    #[validate(length(min = 3, max = 30))]
    pub requester_phone: String,
    #[validate(length(min = 1, max = 300))]
    pub requester_address: String,
    /// Client-supplied timestamp text, stored verbatim.
    #[validate(length(max = 64))]
    pub requested_on: Option<String>,
}

impl SubmitAdoption {
    /// Trim free-text fields and canonicalize emails.
    pub fn normalized(mut self) -> Self {
        self.pet_name = self.pet_name.trim().to_string();
        self.pet_category = self.pet_category.trim().to_string();
        self.owner_name = self.owner_name.trim().to_string();
        self.owner_email = normalize_email(&self.owner_email);
        self.requester_name = self.requester_name.trim().to_string();
        self.requester_email = normalize_email(&self.requester_email);
        self.requester_phone = self.requester_phone.trim().to_string();
        self.requester_address = self.requester_address.trim().to_string();
        self
    }
}

/// Ledger insert produced by the coordinator from a [`SubmitAdoption`] and
/// the pet it resolved to.
#[derive(Debug, Clone)]
pub struct NewAdoptionRecord {
    pub pet_id: DbId,
    pub pet_name: String,
    pub pet_category: String,
    pub pet_image: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    pub requester_address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub requested_on: Option<String>,
}

impl NewAdoptionRecord {
    pub fn new(input: SubmitAdoption, pet: &PetRecord) -> Self {
        Self {
            pet_id: pet.id,
            pet_name: pet.name.clone(),
            pet_category: pet.category.clone(),
            pet_image: pet.image.clone(),
            requester_name: input.requester_name,
            requester_email: input.requester_email,
            requester_phone: input.requester_phone,
            requester_address: input.requester_address,
            owner_name: input.owner_name,
            owner_email: pet.owner_email.clone(),
            requested_on: input.requested_on,
        }
    }
}

/// Result of an accept: both write outcomes plus the request as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptOutcome {
    /// The pet's flag moved from available to unavailable.
    pub pet_updated: bool,
    /// The request moved from pending to accepted.
    pub request_updated: bool,
    pub request: AdoptionRecord,
}

/// Browse filter for available pets.
#[derive(Debug, Clone, PartialEq)]
pub struct PetFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl PetFilter {
    pub fn new(
        category: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Self {
        Self {
            category: normalize_term(category),
            search: normalize_term(search),
            limit: clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            offset: clamp_offset(offset),
        }
    }

    /// Whether `pet` passes the filter (availability, category, name).
    pub fn matches(&self, pet: &PetRecord) -> bool {
        if !pet.is_available() {
            return false;
        }
        if let Some(category) = &self.category {
            if &pet.category != category {
                return false;
            }
        }
        match &self.search {
            Some(term) => contains_ignore_case(&pet.name, term),
            None => true,
        }
    }
}

impl Default for PetFilter {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pet(name: &str, category: &str, adopted: bool) -> PetRecord {
        PetRecord {
            id: 1,
            name: name.to_string(),
            category: category.to_string(),
            image: String::new(),
            owner_name: "Ann".to_string(),
            owner_email: "a@x.com".to_string(),
            adopted,
            adoption_date: Utc::now(),
        }
    }

    fn submission() -> SubmitAdoption {
        SubmitAdoption {
            pet_name: " Max ".to_string(),
            pet_category: "dog".to_string(),
            owner_name: "Ann".to_string(),
            owner_email: "A@X.com".to_string(),
            requester_name: "Bob".to_string(),
            requester_email: "B@Y.com".to_string(),
            requester_phone: "555-0100".to_string(),
            requester_address: "1 Main St".to_string(),
            requested_on: Some("2024-05-01 10:00".to_string()),
        }
    }

    #[test]
    fn filter_excludes_unavailable_pets() {
        let filter = PetFilter::default();
        assert!(filter.matches(&pet("Max", "dog", false)));
        assert!(!filter.matches(&pet("Max", "dog", true)));
    }

    #[test]
    fn filter_requires_exact_category() {
        let filter = PetFilter::new(Some("dog"), None, None, None);
        assert!(filter.matches(&pet("Max", "dog", false)));
        assert!(!filter.matches(&pet("Max", "Dog", false)));
        assert!(!filter.matches(&pet("Max", "cat", false)));
    }

    #[test]
    fn filter_search_is_case_insensitive_substring() {
        let filter = PetFilter::new(Some("dog"), Some("ma"), None, None);
        assert!(filter.matches(&pet("Max", "dog", false)));
        assert!(filter.matches(&pet("Emma", "dog", false)));
        assert!(!filter.matches(&pet("Bella", "dog", false)));
    }

    #[test]
    fn filter_blank_terms_mean_no_filter() {
        let filter = PetFilter::new(Some(" "), Some(""), Some(0), Some(-4));
        assert_eq!(filter.category, None);
        assert_eq!(filter.search, None);
        assert_eq!(filter.limit, 1);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn valid_submission_passes_validation() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn submission_with_bad_email_fails_validation() {
        let mut input = submission();
        input.requester_email = "not-an-email".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("requester_email"));
    }

    #[test]
    fn submission_with_empty_pet_name_fails_validation() {
        let mut input = submission();
        input.pet_name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn normalized_trims_and_lowercases() {
        let input = submission().normalized();
        assert_eq!(input.pet_name, "Max");
        assert_eq!(input.owner_email, "a@x.com");
        assert_eq!(input.requester_email, "b@y.com");
    }

    #[test]
    fn new_record_snapshots_pet_fields() {
        let mut registry_pet = pet("Max", "dog", false);
        registry_pet.image = "https://img/max.png".to_string();
        let record = NewAdoptionRecord::new(submission().normalized(), &registry_pet);
        assert_eq!(record.pet_id, registry_pet.id);
        assert_eq!(record.pet_image, "https://img/max.png");
        assert_eq!(record.owner_email, "a@x.com");
        assert_eq!(record.requester_email, "b@y.com");
    }
}
