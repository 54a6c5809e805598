//! Auth services - Registrazione, login e identità corrente

use crate::core::{AppError, AppState, ClaimSet, Principal, TokenError, ValidatedJson};
use crate::dtos::{CreateUserDTO, LoginDTO, TokenResponseDTO, UserDTO};
use crate::entities::User;
use crate::entities::user::DEFAULT_ROLE;
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = CreateUserDTO,
    responses(
        (status = 201, description = "User registered successfully", body = UserDTO),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already exists")
    ),
    tag = "auth"
)]
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateUserDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering new user");
    if state.user.find_by_username(&body.username).await?.is_some() {
        warn!("Username already taken");
        return Err(AppError::conflict("Username already exists"));
    }

    // bcrypt è CPU-bound: fuori dai worker async
    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || User::hash_password(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {:?}", e);
            AppError::internal_server_error("Failed to hash password")
        })?
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            AppError::internal_server_error("Failed to hash password")
        })?;

    let new_user = User {
        id: Uuid::new_v4(),
        username: body.username,
        password_hash,
        roles: vec![DEFAULT_ROLE.to_string()],
        created_at: Utc::now(),
    };

    let created_user = state.user.create(&new_user).await?;
    info!("User registered with id {}", created_user.id);

    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginDTO,
    responses(
        (status = 200, description = "Login successful", body = TokenResponseDTO),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Token signing key is not configured")
    ),
    tag = "auth"
)]
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<LoginDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    let user = state.user.find_by_username(&body.username).await?;

    // anche per uno username inesistente si paga il costo di bcrypt
    let password = body.password;
    let candidate = user.clone();
    let password_ok = tokio::task::spawn_blocking(move || match candidate {
        Some(candidate) => candidate.verify_password(&password),
        None => User::reject_unknown_password(&password),
    })
    .await
    .map_err(|e| {
        error!("Password verification task failed: {:?}", e);
        AppError::internal_server_error("Failed to verify password")
    })?;

    let user = match user {
        Some(user) if password_ok => user,
        Some(_) => {
            warn!("Wrong password");
            return Err(AppError::unauthorized("Invalid username or password"));
        }
        None => {
            warn!("Login for unknown username");
            return Err(AppError::unauthorized("Invalid username or password"));
        }
    };

    let mut claims = ClaimSet::new();
    claims.insert("username".to_string(), json!(user.username));
    claims.insert("roles".to_string(), json!(user.roles));

    let ttl = state.tokens.default_ttl();
    let token = state
        .tokens
        .issue(&user.id.to_string(), claims, ttl)
        .map_err(|e| match e {
            TokenError::Configuration => {
                error!("Cannot issue tokens: no signing key configured");
                AppError::internal_server_error("Token service is not configured")
            }
            other => {
                error!("Failed to issue token: {}", other);
                AppError::internal_server_error("Failed to issue token")
            }
        })?;

    let cookie_value = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        token,
        ttl.num_seconds().max(0)
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|_| AppError::internal_server_error("Failed to build session cookie"))?,
    );
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?,
    );

    info!("User logged in");
    Ok((
        StatusCode::OK,
        headers,
        Json(TokenResponseDTO {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: ttl.num_seconds(),
        }),
    ))
}

/// Identity attached to the current request by the authentication middleware
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Verified subject and claims", body = Principal),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
#[instrument(skip(principal), fields(subject = %principal.subject))]
pub async fn current_principal(Extension(principal): Extension<Principal>) -> Json<Principal> {
    debug!("Identity requested by {}", principal.username().unwrap_or("<no username>"));
    Json(principal)
}
