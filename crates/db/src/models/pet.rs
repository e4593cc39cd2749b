//! Pet entity model and DTOs.

use petcare_core::adoption::PetRecord;
use petcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub age: Option<i32>,
    pub location: String,
    pub short_description: String,
    pub long_description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub adopted: bool,
    pub adoption_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Pet> for PetRecord {
    fn from(pet: Pet) -> Self {
        PetRecord {
            id: pet.id,
            name: pet.name,
            category: pet.category,
            image: pet.image,
            owner_name: pet.owner_name,
            owner_email: pet.owner_email,
            adopted: pet.adopted,
            adoption_date: pet.adoption_date,
        }
    }
}

/// DTO for listing a new pet. The owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePet {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub age: Option<i32>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 300))]
    pub short_description: Option<String>,
    #[validate(length(max = 5000))]
    pub long_description: Option<String>,
}

/// DTO for updating a pet. All fields optional; owner and flag are not
/// editable here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePet {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub age: Option<i32>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 300))]
    pub short_description: Option<String>,
    #[validate(length(max = 5000))]
    pub long_description: Option<String>,
}
