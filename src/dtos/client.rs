//! Client DTOs - Data Transfer Objects per clienti

use crate::entities::Client;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDTO {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub birthday: NaiveDate,
    pub gender: String,
    pub registration_date: NaiveDate,
    pub address_id: Uuid,
}

impl From<Client> for ClientDTO {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            birthday: value.birthday,
            gender: value.gender,
            registration_date: value.registration_date,
            address_id: value.address_id,
        }
    }
}

/// DTO per creare un nuovo cliente.
/// La data di registrazione non è accettata dal client: la imposta il server.
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientDTO {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 30, message = "Name must be between 1 and 30 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Surname must be between 1 and 50 characters"))]
    pub surname: String,
    #[validate(custom(function = "validate_not_in_future"))]
    pub birthday: NaiveDate,
    #[validate(length(min = 1, max = 20, message = "Gender must be between 1 and 20 characters"))]
    pub gender: String,
    pub address_id: Uuid,
}

impl CreateClientDTO {
    pub fn into_entity(self, registration_date: NaiveDate) -> Client {
        Client {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            surname: self.surname,
            birthday: self.birthday,
            gender: self.gender,
            registration_date,
            address_id: self.address_id,
        }
    }
}

fn validate_not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        let mut err = ValidationError::new("future_date");
        err.message = Some("Birthday cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}
