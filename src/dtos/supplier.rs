//! Supplier DTOs - Data Transfer Objects per fornitori

use crate::entities::Supplier;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // cifre, spazi, +, -, parentesi: massimo 20 caratteri come la colonna
    static ref PHONE_NUMBER_RE: Regex = Regex::new(r"^\+?[0-9()\- ]{3,20}$").unwrap();
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDTO {
    pub id: Uuid,
    pub name: String,
    pub address_id: Uuid,
    pub phone_number: String,
}

impl From<Supplier> for SupplierDTO {
    fn from(value: Supplier) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address_id: value.address_id,
            phone_number: value.phone_number,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierDTO {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 30, message = "Name must be between 1 and 30 characters"))]
    pub name: String,
    pub address_id: Uuid,
    #[validate(
        length(max = 20, message = "Phone number must be at most 20 characters"),
        regex(path = *PHONE_NUMBER_RE, message = "Phone number contains invalid characters")
    )]
    pub phone_number: String,
}

impl CreateSupplierDTO {
    pub fn into_entity(self) -> Supplier {
        Supplier {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            address_id: self.address_id,
            phone_number: self.phone_number,
        }
    }
}
