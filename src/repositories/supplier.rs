//! SupplierRepository - Repository per la gestione dei fornitori

use super::address::{AddressOwner, replace_owner_address};
use super::{Create, Delete, Read, ReadAll};
use crate::entities::{Address, Supplier};
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct SupplierRepository {
    connection_pool: PgPool,
}

impl SupplierRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self, new_address), fields(supplier_id = %id, address_id = %new_address.id))]
    pub async fn replace_address(
        &self,
        id: &Uuid,
        new_address: &Address,
    ) -> Result<Option<Supplier>, Error> {
        replace_owner_address(&self.connection_pool, AddressOwner::Supplier, id, new_address).await
    }
}

impl Create<Supplier> for SupplierRepository {
    #[instrument(skip(self, data), fields(supplier_id = %data.id))]
    async fn create(&self, data: &Supplier) -> Result<Supplier, Error> {
        debug!("Creating new supplier");
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO supplier (id, name, address_id, phone_number)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address_id, phone_number
            "#,
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.address_id)
        .bind(&data.phone_number)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Supplier created");
        Ok(supplier)
    }
}

impl Read<Supplier, Uuid> for SupplierRepository {
    #[instrument(skip(self), fields(supplier_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Supplier>, Error> {
        debug!("Reading supplier by id");
        sqlx::query_as::<_, Supplier>(
            "SELECT id, name, address_id, phone_number FROM supplier WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl ReadAll<Supplier> for SupplierRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Supplier>, Error> {
        debug!("Listing suppliers");
        sqlx::query_as::<_, Supplier>(
            "SELECT id, name, address_id, phone_number FROM supplier ORDER BY name, id",
        )
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Delete<Uuid> for SupplierRepository {
    #[instrument(skip(self), fields(supplier_id = %id))]
    async fn delete(&self, id: &Uuid) -> Result<bool, Error> {
        debug!("Deleting supplier");
        let result = sqlx::query("DELETE FROM supplier WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
