//! Product services - Catalogo prodotti e gestione dello stock

use crate::core::{AppError, AppState, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::dtos::{CreateProductDTO, ProductDTO, ProductIdQuery, StockReductionQuery};
use crate::repositories::{Create, Delete, Read, ReadAll};
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
    path = "/api/v1/products",
    request_body = CreateProductDTO,
    responses(
        (status = 201, description = "Product created", body = ProductDTO),
        (status = 400, description = "Invalid product data"),
        (status = 409, description = "Duplicate id, unknown supplier or unknown image")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
#[instrument(skip(state, body))]
pub async fn add_product(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateProductDTO>,
) -> Result<impl IntoResponse, AppError> {
    let product = body.into_entity(Utc::now().date_naive());
    let product = state.product.create(&product).await?;
    info!("Product {} created", product.id);

    let location = format!("/api/v1/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductDTO::from(product)),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}/available-stock",
    params(("id" = Uuid, Path, description = "Product id"), StockReductionQuery),
    responses(
        (status = 200, description = "Stock reduced", body = ProductDTO),
        (status = 400, description = "amount < 1 or greater than the available stock"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn reduce_available_stock(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedQuery(params): ValidatedQuery<StockReductionQuery>,
) -> Result<Json<ProductDTO>, AppError> {
    let amount = params.amount;
    if amount < 1 {
        warn!("Rejected non-positive amount {}", amount);
        return Err(AppError::bad_request("Invalid amount").with_details("amount must be >= 1"));
    }

    let today = Utc::now().date_naive();
    if let Some(product) = state.product.reduce_stock(&id, amount, today).await? {
        info!("Stock reduced by {}", amount);
        return Ok(Json(product.into()));
    }

    // l'UPDATE condizionale non ha toccato righe: prodotto assente o stock insufficiente
    match state.product.read(&id).await? {
        None => {
            warn!("Product not found");
            Err(AppError::not_found("Product not found"))
        }
        Some(product) if !product.can_reduce_by(amount) => {
            debug!("Requested {} with {} available", amount, product.available_stock);
            Err(AppError::bad_request("Invalid amount")
                .with_details("amount exceeds the available stock"))
        }
        Some(_) => {
            warn!("Stock changed while reducing");
            Err(AppError::conflict("Stock changed concurrently, retry the request"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductDTO),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn get_product_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ProductDTO>, AppError> {
    match state.product.read(&id).await? {
        Some(product) => Ok(Json(product.into())),
        None => {
            warn!("Product not found");
            Err(AppError::not_found("Product not found"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses((status = 200, description = "All products", body = [ProductDTO])),
    security(("bearer_auth" = [])),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDTO>>, AppError> {
    let products = state.product.read_all().await?;
    info!("Returning {} products", products.len());
    Ok(Json(products.into_iter().map(ProductDTO::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products",
    params(ProductIdQuery),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn delete_product_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<ProductIdQuery>,
) -> Result<StatusCode, AppError> {
    if state.product.delete(&params.product_id).await? {
        info!("Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!("Product not found");
        Err(AppError::not_found("Product not found"))
    }
}
