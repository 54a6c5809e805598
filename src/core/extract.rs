//! Extractor - Body JSON, query string e path deserializzati prima di arrivare all'handler
//!
//! Ogni rifiuto diventa un `AppError` 400 con body JSON `{error, details}`.

use crate::core::AppError;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

/// Come `Json<T>`, ma un body malformato o che non supera la validazione
/// diventa sempre un `400 Bad Request`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            AppError::bad_request("Malformed request body").with_details(rejection.body_text())
        })?;

        value.validate().map_err(|e| {
            warn!("Request body failed validation: {}", e);
            AppError::from(e)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Come `Query<T>`, con il rifiuto nel formato `AppError`.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected query string: {}", rejection.body_text());
                AppError::bad_request("Invalid query parameters")
                    .with_details(rejection.body_text())
            })?;
        Ok(ValidatedQuery(value))
    }
}

/// Come `Path<T>`, con il rifiuto nel formato `AppError`.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected path parameters: {}", rejection.body_text());
                AppError::bad_request("Invalid path parameters")
                    .with_details(rejection.body_text())
            })?;
        Ok(ValidatedPath(value))
    }
}
