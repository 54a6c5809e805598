//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Token service JWT e middleware di autenticazione
//! - Configurazione
//! - Gestione errori ed extractor
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;
pub mod token;

// Re-exports per facilitare l'import
pub use auth::{Principal, authentication_middleware};
pub use config::Config;
pub use error::AppError;
pub use extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
pub use state::AppState;
pub use token::{ClaimSet, TokenError, TokenService, VerifiedToken};
