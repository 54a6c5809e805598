//! User DTOs - Data Transfer Objects per utenti e autenticazione

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").unwrap();
}

// struct per gestire io col client, la password non viene mai esposta
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UserDTO {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            roles: value.roles,
        }
    }
}

/// DTO per registrare un nuovo utente
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDTO {
    #[validate(regex(
        path = *USERNAME_RE,
        message = "Username must be 3-32 characters: letters, digits, '_', '.', '-'"
    ))]
    pub username: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginDTO {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseDTO {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(username: &str, password: &str) -> CreateUserDTO {
        CreateUserDTO {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_registration() {
        assert!(dto("mario.rossi", "Password123").validate().is_ok());
    }

    #[test]
    fn username_rules() {
        assert!(dto("ab", "Password123").validate().is_err());
        assert!(dto("Deleted User", "Password123").validate().is_err());
        assert!(dto(&"a".repeat(33), "Password123").validate().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = dto("mario", "short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn user_dto_never_carries_the_hash() {
        let user = User {
            id: Uuid::nil(),
            username: "alice".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            roles: vec!["user".to_string()],
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(UserDTO::from(user)).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
