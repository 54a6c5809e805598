//! ProductRepository - Repository per la gestione dei prodotti

use super::{Create, Delete, Read, ReadAll};
use crate::entities::Product;
use chrono::NaiveDate;
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, category, price, available_stock, last_update_date, supplier_id, image_id";

pub struct ProductRepository {
    connection_pool: PgPool,
}

impl ProductRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Riduce lo stock con un singolo UPDATE condizionale: richieste concorrenti
    /// non possono portare lo stock sotto zero.
    ///
    /// # Returns
    /// * `Ok(Some(Product))` - Stock ridotto
    /// * `Ok(None)` - Prodotto inesistente oppure stock insufficiente
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn reduce_stock(
        &self,
        id: &Uuid,
        amount: i32,
        today: NaiveDate,
    ) -> Result<Option<Product>, Error> {
        debug!("Reducing available stock");
        let query = format!(
            r#"
            UPDATE product
            SET available_stock = available_stock - $1, last_update_date = $2
            WHERE id = $3 AND available_stock >= $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(amount)
            .bind(today)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if let Some(ref p) = product {
            info!("Stock reduced to {}", p.available_stock);
        } else {
            debug!("Stock not reduced");
        }
        Ok(product)
    }
}

impl Create<Product> for ProductRepository {
    #[instrument(skip(self, data), fields(product_id = %data.id))]
    async fn create(&self, data: &Product) -> Result<Product, Error> {
        debug!("Creating new product");
        let query = format!(
            r#"
            INSERT INTO product (
                id, name, category, price, available_stock,
                last_update_date, supplier_id, image_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(data.id)
            .bind(&data.name)
            .bind(&data.category)
            .bind(data.price)
            .bind(data.available_stock)
            .bind(data.last_update_date)
            .bind(data.supplier_id)
            .bind(data.image_id)
            .fetch_one(&self.connection_pool)
            .await?;

        info!("Product created");
        Ok(product)
    }
}

impl Read<Product, Uuid> for ProductRepository {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Product>, Error> {
        debug!("Reading product by id");
        let query = format!("SELECT {} FROM product WHERE id = $1", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl ReadAll<Product> for ProductRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Product>, Error> {
        debug!("Listing products");
        let query = format!("SELECT {} FROM product ORDER BY name, id", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Delete<Uuid> for ProductRepository {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: &Uuid) -> Result<bool, Error> {
        debug!("Deleting product");
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
