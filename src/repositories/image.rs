//! ImageRepository - Repository per la gestione delle immagini dei prodotti

use super::{Create, Delete, Read, Update};
use crate::entities::Image;
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct ImageRepository {
    connection_pool: PgPool,
}

impl ImageRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Immagine associata a un prodotto, se il prodotto esiste e ne ha una
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn find_by_product_id(&self, product_id: &Uuid) -> Result<Option<Image>, Error> {
        debug!("Reading image by product id");
        sqlx::query_as::<_, Image>(
            r#"
            SELECT i.id, i.bytes
            FROM image i
            INNER JOIN product p ON p.image_id = i.id
            WHERE p.id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Create<Image> for ImageRepository {
    #[instrument(skip(self, data), fields(image_id = %data.id, size = data.bytes.len()))]
    async fn create(&self, data: &Image) -> Result<Image, Error> {
        debug!("Storing new image");
        sqlx::query("INSERT INTO image (id, bytes) VALUES ($1, $2)")
            .bind(data.id)
            .bind(&data.bytes)
            .execute(&self.connection_pool)
            .await?;

        info!("Image stored");
        Ok(data.clone())
    }
}

impl Read<Image, Uuid> for ImageRepository {
    #[instrument(skip(self), fields(image_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Image>, Error> {
        debug!("Reading image by id");
        sqlx::query_as::<_, Image>("SELECT id, bytes FROM image WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Image, Vec<u8>, Uuid> for ImageRepository {
    #[instrument(skip(self, data), fields(image_id = %id, size = data.len()))]
    async fn update(&self, id: &Uuid, data: &Vec<u8>) -> Result<Image, Error> {
        debug!("Replacing image bytes");
        let result = sqlx::query("UPDATE image SET bytes = $1 WHERE id = $2")
            .bind(data)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("Image bytes replaced");
        Ok(Image {
            id: *id,
            bytes: data.clone(),
        })
    }
}

impl Delete<Uuid> for ImageRepository {
    #[instrument(skip(self), fields(image_id = %id))]
    async fn delete(&self, id: &Uuid) -> Result<bool, Error> {
        debug!("Deleting image");
        let result = sqlx::query("DELETE FROM image WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
