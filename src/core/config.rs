use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),
    #[error("Invalid {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: Option<String>,
    pub jwt_ttl_secs: i64,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub connection_lifetime_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: usize,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione da una sorgente di chiavi arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = lookup("JWT_SECRET").filter(|s| !s.is_empty());
        if jwt_secret.is_none() {
            warn!("JWT_SECRET not set: login will fail until a signing key is configured");
        }

        let jwt_ttl_secs: i64 = parse_or(
            &lookup,
            "JWT_TTL_SECS",
            24 * 60 * 60,
            "must be a number of seconds",
        )?;
        if chrono::Duration::try_seconds(jwt_ttl_secs).is_none() {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_SECS",
                reason: "is out of range",
            });
        }

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = parse_or(
            &lookup,
            "SERVER_PORT",
            3000,
            "must be a number between 0-65535",
        )?;

        let max_connections: u32 =
            parse_or(&lookup, "MAX_DB_CONNECTIONS", 10, "must be a positive number")?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_DB_CONNECTIONS",
                reason: "must be a positive number",
            });
        }

        let acquire_timeout_secs =
            parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5, "must be a positive number")?;

        let connection_lifetime_secs = parse_or(
            &lookup,
            "DB_CONNECTION_LIFETIME_SECS",
            30 * 60,
            "must be a positive number",
        )?;

        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "must be a positive number")?;

        let max_image_bytes = parse_or(
            &lookup,
            "MAX_IMAGE_BYTES",
            10 * 1024 * 1024,
            "must be a number of bytes",
        )?;

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_ttl_secs,
            server_host,
            server_port,
            max_connections,
            acquire_timeout_secs,
            connection_lifetime_secs,
            request_timeout_secs,
            max_image_bytes,
            app_env,
        })
    }

    pub fn jwt_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.jwt_ttl_secs).unwrap_or(chrono::Duration::MAX)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn connection_lifetime(&self) -> Duration {
        Duration::from_secs(self.connection_lifetime_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn log_info(&self) {
        info!(
            environment = %self.app_env,
            address = %format!("{}:{}", self.server_host, self.server_port),
            database = %Self::mask_url(&self.database_url),
            max_db_connections = self.max_connections,
            acquire_timeout_secs = self.acquire_timeout_secs,
            connection_lifetime_secs = self.connection_lifetime_secs,
            request_timeout_secs = self.request_timeout_secs,
            jwt_ttl_secs = self.jwt_ttl_secs,
            jwt_secret = if self.jwt_secret.is_some() { "configured" } else { "MISSING" },
            "Server configuration"
        );
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    reason: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, reason }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/shop")]))
                .unwrap();

        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.jwt_ttl_secs, 86_400);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert_eq!(config.app_env, "development");
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("SERVER_PORT", "seventy"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("MAX_DB_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MAX_DB_CONNECTIONS", .. }));
    }

    #[test]
    fn out_of_range_ttl_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_TTL_SECS", "9223372036854775807"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "JWT_TTL_SECS",
                reason: "is out of range"
            }
        );

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_TTL_SECS", "3600"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_SECRET", ""),
        ]))
        .unwrap();
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn mask_url_hides_credentials() {
        assert_eq!(
            Config::mask_url("postgres://shop:hunter2@db:5432/shop"),
            "postgres://***@db:5432/shop"
        );
        assert_eq!(Config::mask_url("postgres://db/shop"), "***");
    }
}
