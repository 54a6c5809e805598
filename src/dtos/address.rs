//! Address DTOs - Data Transfer Objects per indirizzi

use crate::entities::Address;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDTO {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub street: String,
}

impl From<Address> for AddressDTO {
    fn from(value: Address) -> Self {
        Self {
            id: value.id,
            country: value.country,
            city: value.city,
            street: value.street,
        }
    }
}

/// DTO per creare un nuovo indirizzo (id opzionale, generato se assente)
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressDTO {
    pub id: Option<Uuid>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Country must be between 1 and 100 characters"
    ))]
    pub country: String,
    #[validate(length(min = 1, max = 100, message = "City must be between 1 and 100 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "Street must be between 1 and 100 characters"))]
    pub street: String,
}

impl CreateAddressDTO {
    /// Materializza l'entità assegnando un id se il chiamante non l'ha fornito
    pub fn into_entity(self) -> Address {
        Address {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            country: self.country,
            city: self.city,
            street: self.street,
        }
    }
}
