//! Supplier services - Gestione dei fornitori

use crate::core::{AppError, AppState, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::dtos::{CreateAddressDTO, CreateSupplierDTO, IdQuery, SupplierDTO};
use crate::repositories::{Create, Delete, Read, ReadAll};
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
    path = "/api/v1/suppliers",
    request_body = CreateSupplierDTO,
    responses(
        (status = 201, description = "Supplier created", body = SupplierDTO),
        (status = 400, description = "Invalid supplier data"),
        (status = 409, description = "Duplicate id or unknown address")
    ),
    security(("bearer_auth" = [])),
    tag = "suppliers"
)]
#[instrument(skip(state, body))]
pub async fn add_supplier(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateSupplierDTO>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = state.supplier.create(&body.into_entity()).await?;
    info!("Supplier {} created", supplier.id);

    let location = format!("/api/v1/suppliers/{}", supplier.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SupplierDTO::from(supplier)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    responses((status = 200, description = "All suppliers", body = [SupplierDTO])),
    security(("bearer_auth" = [])),
    tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SupplierDTO>>, AppError> {
    let suppliers = state.supplier.read_all().await?;
    info!("Returning {} suppliers", suppliers.len());
    Ok(Json(suppliers.into_iter().map(SupplierDTO::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier found", body = SupplierDTO),
        (status = 404, description = "Supplier not found")
    ),
    security(("bearer_auth" = [])),
    tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn get_supplier_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SupplierDTO>, AppError> {
    state
        .supplier
        .read(&id)
        .await?
        .map(|supplier| Json(supplier.into()))
        .ok_or_else(|| {
            warn!("Supplier not found");
            AppError::not_found("Supplier not found")
        })
}

#[utoipa::path(
    patch,
    path = "/api/v1/suppliers/{id}/address",
    params(("id" = Uuid, Path, description = "Supplier id")),
    request_body = CreateAddressDTO,
    responses(
        (status = 200, description = "Address replaced", body = SupplierDTO),
        (status = 400, description = "Invalid address"),
        (status = 404, description = "Supplier not found")
    ),
    security(("bearer_auth" = [])),
    tag = "suppliers"
)]
#[instrument(skip(state, body))]
pub async fn change_supplier_address(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateAddressDTO>,
) -> Result<Json<SupplierDTO>, AppError> {
    let new_address = body.into_entity();
    state
        .supplier
        .replace_address(&id, &new_address)
        .await?
        .map(|supplier| {
            info!("Supplier address replaced");
            Json(supplier.into())
        })
        .ok_or_else(|| {
            warn!("Supplier not found");
            AppError::not_found("Supplier not found")
        })
}

#[utoipa::path(
    delete,
    path = "/api/v1/suppliers",
    params(IdQuery),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found"),
        (status = 409, description = "Products still reference this supplier")
    ),
    security(("bearer_auth" = [])),
    tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn delete_supplier_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<IdQuery>,
) -> Result<StatusCode, AppError> {
    if state.supplier.delete(&params.id).await? {
        info!("Supplier deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!("Supplier not found");
        Err(AppError::not_found("Supplier not found"))
    }
}
