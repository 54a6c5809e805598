//! AddressRepository - Repository per la gestione degli indirizzi

use super::{Create, Read};
use crate::entities::Address;
use sqlx::postgres::PgRow;
use sqlx::{Error, FromRow, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Un indirizzo viene cancellato solo quando nessun cliente o fornitore lo usa più
const DELETE_ORPHANED_ADDRESS: &str = r#"
    DELETE FROM address
    WHERE id = $1
    AND NOT EXISTS (SELECT 1 FROM client WHERE address_id = $1)
    AND NOT EXISTS (SELECT 1 FROM supplier WHERE address_id = $1)
"#;

pub struct AddressRepository {
    connection_pool: PgPool,
}

impl AddressRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Address> for AddressRepository {
    #[instrument(skip(self, data), fields(address_id = %data.id))]
    async fn create(&self, data: &Address) -> Result<Address, Error> {
        debug!("Creating new address");
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO address (id, country, city, street)
            VALUES ($1, $2, $3, $4)
            RETURNING id, country, city, street
            "#,
        )
        .bind(data.id)
        .bind(&data.country)
        .bind(&data.city)
        .bind(&data.street)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Address created");
        Ok(address)
    }
}

impl Read<Address, Uuid> for AddressRepository {
    #[instrument(skip(self), fields(address_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Address>, Error> {
        debug!("Reading address by id");
        sqlx::query_as::<_, Address>("SELECT id, country, city, street FROM address WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

/// Tabelle che referenziano un indirizzo tramite `address_id`
#[derive(Debug, Clone, Copy)]
pub(super) enum AddressOwner {
    Client,
    Supplier,
}

impl AddressOwner {
    fn table(self) -> &'static str {
        match self {
            AddressOwner::Client => "client",
            AddressOwner::Supplier => "supplier",
        }
    }

    fn columns(self) -> &'static str {
        match self {
            AddressOwner::Client => {
                "id, name, surname, birthday, gender, registration_date, address_id"
            }
            AddressOwner::Supplier => "id, name, address_id, phone_number",
        }
    }
}

/// Sostituisce l'indirizzo di un cliente o fornitore in un'unica transazione:
/// inserisce il nuovo indirizzo, aggiorna il proprietario e cancella il vecchio
/// indirizzo se è rimasto orfano.
///
/// # Returns
/// * `Ok(Some(T))` - Proprietario aggiornato
/// * `Ok(None)` - Nessun proprietario con quell'id (nulla viene scritto)
pub(super) async fn replace_owner_address<T>(
    pool: &PgPool,
    owner: AddressOwner,
    owner_id: &Uuid,
    new_address: &Address,
) -> Result<Option<T>, Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut tx = pool.begin().await?;

    let select = format!(
        "SELECT address_id FROM {} WHERE id = $1 FOR UPDATE",
        owner.table()
    );
    let old_address_id: Option<Uuid> = sqlx::query_scalar(&select)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(old_address_id) = old_address_id else {
        debug!("No {} with id {}", owner.table(), owner_id);
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query("INSERT INTO address (id, country, city, street) VALUES ($1, $2, $3, $4)")
        .bind(new_address.id)
        .bind(&new_address.country)
        .bind(&new_address.city)
        .bind(&new_address.street)
        .execute(&mut *tx)
        .await?;

    let update = format!(
        "UPDATE {} SET address_id = $1 WHERE id = $2 RETURNING {}",
        owner.table(),
        owner.columns()
    );
    let updated = sqlx::query_as::<_, T>(&update)
        .bind(new_address.id)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

    let removed = sqlx::query(DELETE_ORPHANED_ADDRESS)
        .bind(old_address_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    info!(
        "Address of {} {} replaced ({} old address rows removed)",
        owner.table(),
        owner_id,
        removed
    );
    Ok(Some(updated))
}
