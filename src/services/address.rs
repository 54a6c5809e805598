//! Address services - Gestione degli indirizzi

use crate::core::{AppError, AppState, ValidatedJson, ValidatedPath};
use crate::dtos::{AddressDTO, CreateAddressDTO};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/addresses",
    request_body = CreateAddressDTO,
    responses(
        (status = 201, description = "Address created", body = AddressDTO),
        (status = 400, description = "Invalid address"),
        (status = 409, description = "An address with this id already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "addresses"
)]
#[instrument(skip(state, body))]
pub async fn add_address(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateAddressDTO>,
) -> Result<impl IntoResponse, AppError> {
    let address = state.address.create(&body.into_entity()).await?;
    info!("Address {} created", address.id);

    let location = format!("/api/v1/addresses/{}", address.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AddressDTO::from(address)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address found", body = AddressDTO),
        (status = 404, description = "Address not found")
    ),
    security(("bearer_auth" = [])),
    tag = "addresses"
)]
#[instrument(skip(state))]
pub async fn get_address_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<AddressDTO>, AppError> {
    match state.address.read(&id).await? {
        Some(address) => Ok(Json(address.into())),
        None => {
            warn!("Address not found");
            Err(AppError::not_found("Address not found"))
        }
    }
}
