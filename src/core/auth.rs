use crate::core::token::ClaimSet;
use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

/// Identità verificata associata alla richiesta dall'authentication_middleware.
/// Gli handler la recuperano con `Extension<Principal>`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Principal {
    pub subject: String,
    #[schema(value_type = Object)]
    pub claims: ClaimSet,
}

impl Principal {
    pub fn username(&self) -> Option<&str> {
        self.claims.get("username").and_then(|v| v.as_str())
    }
}

/// Estrae il token da un header `Authorization: Bearer <token>`.
/// Lo schema è case-insensitive, il token non può essere vuoto.
pub fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let (scheme, token) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Invalid authorization header")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized(
                "Please add the JWT token to the header",
            ));
        }
    };

    let token = bearer_token(auth_header).ok_or_else(|| {
        warn!("Authorization header is not a bearer credential");
        AppError::unauthorized("Authorization header must be 'Bearer <token>'")
    })?;

    let verified = state.tokens.verify(token).map_err(|e| {
        warn!("Token rejected: {}", e);
        AppError::unauthorized("Invalid or expired token")
    })?;

    info!("Request authenticated for subject {}", verified.subject);
    req.extensions_mut().insert(Principal {
        subject: verified.subject,
        claims: verified.claims,
    });
    Ok(next.run(req).await)
}
