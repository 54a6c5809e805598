//! UserRepository - Repository per la gestione degli utenti

use super::Create;
use crate::entities::User;
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};

pub struct UserRepository {
    connection_pool: PgPool,
}

impl UserRepository {
    pub fn new(connection_pool: PgPool) -> UserRepository {
        Self { connection_pool }
    }

    /// Find user by exact username match (usernames are unique)
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        debug!("Finding user by username");
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, roles, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Create<User> for UserRepository {
    #[instrument(skip(self, data), fields(username = %data.username))]
    async fn create(&self, data: &User) -> Result<User, Error> {
        debug!("Creating new user");
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, roles, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, roles, created_at
            "#,
        )
        .bind(data.id)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.roles)
        .bind(data.created_at)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("User created with id {}", user.id);
        Ok(user)
    }
}
