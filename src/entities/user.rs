//! User entity - Entità utente con metodi per gestione password

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use sqlx::FromRow;
use uuid::Uuid;

/// Ruolo assegnato di default alla registrazione
pub const DEFAULT_ROLE: &str = "user";

lazy_static! {
    // hash con lo stesso costo di quelli salvati, usato quando lo username non esiste
    static ref UNKNOWN_USER_HASH: Option<String> = hash("unknown-user", DEFAULT_COST).ok();
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password_hash).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    /// Login per uno username inesistente: paga lo stesso costo bcrypt di
    /// `verify_password` e fallisce sempre.
    pub fn reject_unknown_password(target_password: &str) -> bool {
        if let Some(dummy) = UNKNOWN_USER_HASH.as_ref() {
            let _ = verify(target_password, dummy);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: User::hash_password(password).unwrap(),
            roles: vec![DEFAULT_ROLE.to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hashed_password_verifies() {
        let user = user_with_password("Sup3rSecret!");
        assert_ne!(user.password_hash, "Sup3rSecret!");
        assert!(user.verify_password("Sup3rSecret!"));
        assert!(!user.verify_password("wrong-password"));
    }

    #[test]
    fn unknown_user_check_uses_real_hash_cost() {
        let dummy = UNKNOWN_USER_HASH.as_ref().expect("dummy hash must be computed");
        let real = User::hash_password("Sup3rSecret!").unwrap();
        // "$2b$12$": versione e costo coincidono
        assert_eq!(&dummy[..7], &real[..7]);
        assert!(!User::reject_unknown_password("unknown-user"));
        assert!(!User::reject_unknown_password("Sup3rSecret!"));
    }

    #[test]
    fn corrupted_hash_never_verifies() {
        let mut user = user_with_password("Sup3rSecret!");
        user.password_hash = "not-a-bcrypt-hash".to_string();
        assert!(!user.verify_password("Sup3rSecret!"));
    }
}
