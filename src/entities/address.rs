//! Address entity - Indirizzo, immutabile una volta scritto

use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Address {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub street: String,
}
