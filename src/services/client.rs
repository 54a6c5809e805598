//! Client services - Gestione dei clienti

use crate::core::{AppError, AppState, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::dtos::{
    ClientDTO, ClientSearchQuery, CreateAddressDTO, CreateClientDTO, IdQuery, PageQuery,
};
use crate::repositories::{Create, Delete, Read};
use axum::{
    extract::{Json, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = CreateClientDTO,
    responses(
        (status = 201, description = "Client created", body = ClientDTO),
        (status = 400, description = "Invalid client data"),
        (status = 409, description = "Duplicate id or unknown address")
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state, body))]
pub async fn add_client(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateClientDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating client");
    // la data di registrazione la decide il server
    let client = body.into_entity(Utc::now().date_naive());
    let client = state.client.create(&client).await?;
    info!("Client {} created", client.id);

    let location = format!("/api/v1/clients/{}", client.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClientDTO::from(client)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client found", body = ClientDTO),
        (status = 404, description = "Client not found")
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state))]
pub async fn get_client_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ClientDTO>, AppError> {
    match state.client.read(&id).await? {
        Some(client) => Ok(Json(client.into())),
        None => {
            warn!("Client not found");
            Err(AppError::not_found("Client not found"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    params(PageQuery),
    responses(
        (status = 200, description = "Clients ordered by registration date", body = [ClientDTO]),
        (status = 400, description = "limit < 1 or offset < 0")
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state))]
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<PageQuery>,
) -> Result<Json<Vec<ClientDTO>>, AppError> {
    let invalid_limit = matches!(params.limit, Some(limit) if limit < 1);
    let invalid_offset = matches!(params.offset, Some(offset) if offset < 0);
    if invalid_limit || invalid_offset {
        warn!("Rejected pagination parameters");
        return Err(AppError::bad_request("Invalid limit or offset")
            .with_details("limit must be >= 1 and offset must be >= 0"));
    }

    let clients = state
        .client
        .find_page(params.limit, params.offset.unwrap_or(0))
        .await?;
    info!("Returning {} clients", clients.len());
    Ok(Json(clients.into_iter().map(ClientDTO::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/search",
    params(ClientSearchQuery),
    responses(
        (status = 200, description = "Clients with exactly this name and surname",
            body = [ClientDTO])
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state))]
pub async fn search_clients(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<ClientSearchQuery>,
) -> Result<Json<Vec<ClientDTO>>, AppError> {
    let clients = state
        .client
        .find_by_name_and_surname(&params.first_name, &params.last_name)
        .await?;
    Ok(Json(clients.into_iter().map(ClientDTO::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/clients/{id}/address",
    params(("id" = Uuid, Path, description = "Client id")),
    request_body = CreateAddressDTO,
    responses(
        (status = 200, description = "Address replaced", body = ClientDTO),
        (status = 400, description = "Invalid address"),
        (status = 404, description = "Client not found")
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state, body))]
pub async fn change_client_address(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateAddressDTO>,
) -> Result<Json<ClientDTO>, AppError> {
    let new_address = body.into_entity();
    match state.client.replace_address(&id, &new_address).await? {
        Some(client) => {
            info!("Client address replaced");
            Ok(Json(client.into()))
        }
        None => {
            warn!("Client not found");
            Err(AppError::not_found("Client not found"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients",
    params(IdQuery),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found")
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
#[instrument(skip(state))]
pub async fn delete_client_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<IdQuery>,
) -> Result<StatusCode, AppError> {
    if state.client.delete(&params.id).await? {
        info!("Client deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!("Client not found");
        Err(AppError::not_found("Client not found"))
    }
}
