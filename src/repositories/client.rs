//! ClientRepository - Repository per la gestione dei clienti

use super::address::{AddressOwner, replace_owner_address};
use super::{Create, Delete, Read};
use crate::entities::{Address, Client};
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const CLIENT_COLUMNS: &str = "id, name, surname, birthday, gender, registration_date, address_id";

pub struct ClientRepository {
    connection_pool: PgPool,
}

impl ClientRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Lista paginata ordinata per data di registrazione.
    /// `limit = None` non pone limiti (LIMIT NULL in PostgreSQL).
    #[instrument(skip(self))]
    pub async fn find_page(&self, limit: Option<i64>, offset: i64) -> Result<Vec<Client>, Error> {
        debug!("Listing clients");
        let query = format!(
            "SELECT {} FROM client ORDER BY registration_date, id LIMIT $1 OFFSET $2",
            CLIENT_COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Ricerca esatta per nome e cognome
    #[instrument(skip(self))]
    pub async fn find_by_name_and_surname(
        &self,
        name: &str,
        surname: &str,
    ) -> Result<Vec<Client>, Error> {
        debug!("Searching clients by name and surname");
        let query = format!(
            "SELECT {} FROM client WHERE name = $1 AND surname = $2 ORDER BY registration_date, id",
            CLIENT_COLUMNS
        );
        let clients = sqlx::query_as::<_, Client>(&query)
            .bind(name)
            .bind(surname)
            .fetch_all(&self.connection_pool)
            .await?;

        info!("Found {} clients", clients.len());
        Ok(clients)
    }

    #[instrument(skip(self, new_address), fields(client_id = %id, address_id = %new_address.id))]
    pub async fn replace_address(
        &self,
        id: &Uuid,
        new_address: &Address,
    ) -> Result<Option<Client>, Error> {
        replace_owner_address(&self.connection_pool, AddressOwner::Client, id, new_address).await
    }
}

impl Create<Client> for ClientRepository {
    #[instrument(skip(self, data), fields(client_id = %data.id))]
    async fn create(&self, data: &Client) -> Result<Client, Error> {
        debug!("Creating new client");
        let query = format!(
            r#"
            INSERT INTO client (id, name, surname, birthday, gender, registration_date, address_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CLIENT_COLUMNS
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(data.id)
            .bind(&data.name)
            .bind(&data.surname)
            .bind(data.birthday)
            .bind(&data.gender)
            .bind(data.registration_date)
            .bind(data.address_id)
            .fetch_one(&self.connection_pool)
            .await?;

        info!("Client created");
        Ok(client)
    }
}

impl Read<Client, Uuid> for ClientRepository {
    #[instrument(skip(self), fields(client_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Client>, Error> {
        debug!("Reading client by id");
        let query = format!("SELECT {} FROM client WHERE id = $1", CLIENT_COLUMNS);
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete<Uuid> for ClientRepository {
    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete(&self, id: &Uuid) -> Result<bool, Error> {
        debug!("Deleting client");
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
