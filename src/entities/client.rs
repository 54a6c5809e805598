//! Client entity - Cliente del negozio

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub birthday: NaiveDate,
    pub gender: String,
    /// Impostata dal server alla creazione, mai dal chiamante
    pub registration_date: NaiveDate,
    pub address_id: Uuid,
}
