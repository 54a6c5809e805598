//! Supplier entity - Fornitore dei prodotti

use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub address_id: Uuid,
    pub phone_number: String, // String: può contenere +, -, parentesi e zeri iniziali
}
