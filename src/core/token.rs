//! Token service - Emissione e verifica dei JWT firmati con HS256
//!
//! Il servizio è stateless: non esiste una sessione lato server, quindi un token
//! resta valido fino alla sua scadenza naturale (nessuna revoca anticipata).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Claim aggiuntivi forniti dal chiamante, serializzati accanto a quelli registrati
pub type ClaimSet = Map<String, Value>;

const RESERVED_CLAIMS: [&str; 4] = ["sub", "iat", "exp", "jti"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("no signing key is configured")]
    Configuration,
    #[error("claim `{0}` is reserved and cannot be supplied by the caller")]
    ReservedClaim(String),
    #[error("token could not be encoded: {0}")]
    Encoding(String),
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    TokenExpired,
}

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64, // Issued at time of the token
    pub exp: i64, // Expiry time of the token
    pub jti: String,
    #[serde(flatten)]
    pub extra: ClaimSet,
}

/// Risultato di una verifica andata a buon fine
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    pub subject: String,
    pub claims: ClaimSet,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

#[derive(Clone)]
pub struct TokenService {
    keys: Option<SigningKeys>,
    default_ttl: Duration,
}

impl TokenService {
    /// Crea il servizio a partire dal segreto condiviso.
    /// Un segreto assente o vuoto lascia il servizio senza chiave: ogni emissione
    /// fallirà con `TokenError::Configuration`.
    pub fn new(secret: Option<&str>, default_ttl: Duration) -> Self {
        let keys = secret.filter(|s| !s.is_empty()).map(|s| SigningKeys {
            encoding: EncodingKey::from_secret(s.as_bytes()),
            decoding: DecodingKey::from_secret(s.as_bytes()),
        });
        if keys.is_none() {
            warn!("Token service created without a signing key");
        }
        Self { keys, default_ttl }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn issue(
        &self,
        subject: &str,
        claims: ClaimSet,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        self.issue_at(subject, claims, ttl, Utc::now())
    }

    #[instrument(skip(self, claims), fields(subject = %subject, ttl_secs = ttl.num_seconds()))]
    pub fn issue_at(
        &self,
        subject: &str,
        claims: ClaimSet,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        debug!("Encoding JWT token");
        let keys = self.keys.as_ref().ok_or(TokenError::Configuration)?;

        if let Some(name) = claims
            .keys()
            .find(|name| RESERVED_CLAIMS.contains(&name.as_str()))
        {
            return Err(TokenError::ReservedClaim(name.clone()));
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("expiry is out of range".to_string()))?;

        let payload = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            extra: claims,
        };

        encode(&Header::new(Algorithm::HS256), &payload, &keys.encoding).map_err(|e| {
            warn!("Failed to encode JWT token: {:?}", e);
            TokenError::Encoding(e.to_string())
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifica firma e scadenza. La firma viene controllata per prima, quindi un
    /// token manomesso e scaduto viene rifiutato come `InvalidSignature`.
    #[instrument(skip(self, token))]
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedToken, TokenError> {
        debug!("Decoding JWT token");
        let keys = self.keys.as_ref().ok_or(TokenError::Configuration)?;

        let mut validation = Validation::new(Algorithm::HS256);
        // la scadenza è controllata qui sotto, senza leeway e con l'orologio fornito
        validation.validate_exp = false;
        validation.leeway = 0;
        // aud, iss e nbf sono claim del chiamante come gli altri
        validation.validate_aud = false;
        validation.required_spec_claims = ["sub", "exp"].iter().map(|c| c.to_string()).collect();

        let data = decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| {
            debug!("Failed to decode JWT token: {:?}", e);
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::MalformedToken,
            }
        })?;

        let claims = data.claims;
        if now.timestamp() >= claims.exp {
            debug!("JWT token expired at {}", claims.exp);
            return Err(TokenError::TokenExpired);
        }

        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::MalformedToken)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::MalformedToken)?;

        Ok(VerifiedToken {
            subject: claims.sub,
            claims: claims.extra,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn service() -> TokenService {
        TokenService::new(Some(SECRET), Duration::hours(1))
    }

    fn claims() -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.insert("username".to_string(), json!("alice"));
        claims.insert("roles".to_string(), json!(["user", "admin"]));
        claims
    }

    fn tamper_signature(token: &str) -> String {
        let (message, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", message, chars.into_iter().collect::<String>())
    }

    #[test]
    fn verify_returns_subject_and_claims_before_expiry() {
        let service = service();
        let token = service.issue("user-42", claims(), Duration::minutes(5)).unwrap();

        let verified = service.verify(&token).unwrap();
        assert_eq!(verified.subject, "user-42");
        assert_eq!(verified.claims, claims());
        assert!(verified.expires_at > verified.issued_at);
    }

    #[test]
    fn non_positive_ttl_is_expired_immediately() {
        let service = service();

        let zero = service.issue("user-42", claims(), Duration::zero()).unwrap();
        assert_eq!(service.verify(&zero), Err(TokenError::TokenExpired));

        let negative = service.issue("user-42", claims(), Duration::seconds(-30)).unwrap();
        assert_eq!(service.verify(&negative), Err(TokenError::TokenExpired));
    }

    #[test]
    fn altered_signature_is_rejected() {
        let service = service();
        let token = service.issue("user-42", claims(), Duration::minutes(5)).unwrap();

        assert_eq!(
            service.verify(&tamper_signature(&token)),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn altered_signature_wins_over_expiry() {
        let service = service();
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = service
            .issue_at("user-42", claims(), Duration::minutes(5), issued)
            .unwrap();

        let later = issued + Duration::hours(2);
        assert_eq!(
            service.verify_at(&tamper_signature(&token), later),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let service = service();
        let alice = service.issue("alice", ClaimSet::new(), Duration::minutes(5)).unwrap();
        let mallory = service.issue("mallory", ClaimSet::new(), Duration::minutes(5)).unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", alice_parts[0], mallory_parts[1], alice_parts[2]);

        assert_eq!(service.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenService::new(Some("a-completely-different-secret"), Duration::hours(1));
        let token = other.issue("user-42", claims(), Duration::minutes(5)).unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn valid_signature_after_expiry_is_expired() {
        let service = service();
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = service
            .issue_at("user-42", claims(), Duration::minutes(10), issued)
            .unwrap();

        assert!(service.verify_at(&token, issued + Duration::minutes(9)).is_ok());
        // scadenza esattamente all'istante exp
        assert_eq!(
            service.verify_at(&token, issued + Duration::minutes(10)),
            Err(TokenError::TokenExpired)
        );
        assert_eq!(
            service.verify_at(&token, issued + Duration::days(1)),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn tokens_issued_at_different_times_differ_and_verify_independently() {
        let service = service();
        let first_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let second_at = first_at + Duration::seconds(30);

        let first = service
            .issue_at("user-42", claims(), Duration::minutes(1), first_at)
            .unwrap();
        let second = service
            .issue_at("user-42", claims(), Duration::minutes(1), second_at)
            .unwrap();
        assert_ne!(first, second);

        let check_at = first_at + Duration::seconds(45);
        assert_eq!(service.verify_at(&first, check_at).unwrap().subject, "user-42");
        assert_eq!(service.verify_at(&second, check_at).unwrap().subject, "user-42");

        // il primo scade prima del secondo
        let check_at = first_at + Duration::seconds(70);
        assert_eq!(service.verify_at(&first, check_at), Err(TokenError::TokenExpired));
        assert!(service.verify_at(&second, check_at).is_ok());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = service();
        assert_eq!(service.verify("not-a-token"), Err(TokenError::MalformedToken));
        assert_eq!(service.verify("a.b.c"), Err(TokenError::MalformedToken));
        assert_eq!(service.verify(""), Err(TokenError::MalformedToken));
    }

    #[test]
    fn registered_claim_names_round_trip_as_caller_claims() {
        let service = service();
        let mut claims = claims();
        claims.insert("aud".to_string(), json!("shop"));
        claims.insert("iss".to_string(), json!("shop-server"));
        claims.insert("nbf".to_string(), json!(0));

        let token = service.issue("user-42", claims.clone(), Duration::minutes(5)).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified.subject, "user-42");
        assert_eq!(verified.claims, claims);
    }

    #[test]
    fn missing_secret_is_a_configuration_error() {
        let unset = TokenService::new(None, Duration::hours(1));
        assert_eq!(
            unset.issue("user-42", claims(), Duration::minutes(5)),
            Err(TokenError::Configuration)
        );

        let empty = TokenService::new(Some(""), Duration::hours(1));
        assert_eq!(
            empty.issue("user-42", claims(), Duration::minutes(5)),
            Err(TokenError::Configuration)
        );
        assert_eq!(empty.verify("a.b.c"), Err(TokenError::Configuration));
    }

    #[test]
    fn reserved_claims_cannot_be_overridden() {
        let mut claims = claims();
        claims.insert("exp".to_string(), json!(0));

        assert_eq!(
            service().issue("user-42", claims, Duration::minutes(5)),
            Err(TokenError::ReservedClaim("exp".to_string()))
        );
    }
}
