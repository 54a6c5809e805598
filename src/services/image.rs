//! Image services - Upload e download delle immagini dei prodotti (byte grezzi)

use crate::core::{AppError, AppState, ValidatedPath, ValidatedQuery};
use crate::dtos::{IdQuery, ImageUploadQuery};
use crate::entities::Image;
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    body::Bytes,
    extract::{Json, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Risposta binaria: il browser scarica il file invece di mostrarlo
fn attachment(image: Image) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", image.download_name());
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/v1/images",
    params(ImageUploadQuery),
    request_body(
        content = Vec<u8>,
        description = "Raw image bytes",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 201, description = "Image stored, body is its id", body = String),
        (status = 400, description = "Empty payload"),
        (status = 409, description = "An image with this id already exists"),
        (status = 413, description = "Payload too large")
    ),
    security(("bearer_auth" = [])),
    tag = "images"
)]
#[instrument(skip(state, body), fields(size = body.len()))]
pub async fn add_image(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<ImageUploadQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        warn!("Empty image payload");
        return Err(AppError::bad_request("Image payload is empty"));
    }

    let image = Image {
        id: params.id.unwrap_or_else(Uuid::new_v4),
        bytes: body.to_vec(),
    };
    let image = state.image.create(&image).await?;
    info!("Image {} stored", image.id);

    let location = format!("/api/v1/images/{}", image.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(image.id)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/images/{id}",
    params(("id" = Uuid, Path, description = "Image id")),
    request_body(
        content = Vec<u8>,
        description = "New image bytes",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 200, description = "Image replaced, body is its id", body = String),
        (status = 400, description = "Empty payload"),
        (status = 404, description = "Image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "images"
)]
#[instrument(skip(state, body), fields(size = body.len()))]
pub async fn change_image(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    body: Bytes,
) -> Result<Json<Uuid>, AppError> {
    if body.is_empty() {
        warn!("Empty image payload");
        return Err(AppError::bad_request("Image payload is empty"));
    }

    match state.image.update(&id, &body.to_vec()).await {
        Ok(image) => {
            info!("Image replaced");
            Ok(Json(image.id))
        }
        Err(sqlx::Error::RowNotFound) => {
            warn!("Image not found");
            Err(AppError::not_found("Image not found"))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{id}",
    params(("id" = Uuid, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>,
            content_type = "application/octet-stream"),
        (status = 404, description = "Image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "images"
)]
#[instrument(skip(state))]
pub async fn get_image_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Response, AppError> {
    match state.image.read(&id).await? {
        Some(image) => Ok(attachment(image)),
        None => {
            warn!("Image not found");
            Err(AppError::not_found("Image not found"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/images/products/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Image bytes of the product", body = Vec<u8>,
            content_type = "application/octet-stream"),
        (status = 404, description = "Product not found or without image")
    ),
    security(("bearer_auth" = [])),
    tag = "images"
)]
#[instrument(skip(state))]
pub async fn get_image_by_product_id(
    State(state): State<Arc<AppState>>,
    ValidatedPath(product_id): ValidatedPath<Uuid>,
) -> Result<Response, AppError> {
    match state.image.find_by_product_id(&product_id).await? {
        Some(image) => Ok(attachment(image)),
        None => {
            warn!("No image for product");
            Err(AppError::not_found("No image found for this product"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/images",
    params(IdQuery),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "Image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "images"
)]
#[instrument(skip(state))]
pub async fn delete_image_by_id(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<IdQuery>,
) -> Result<StatusCode, AppError> {
    if state.image.delete(&params.id).await? {
        info!("Image deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!("Image not found");
        Err(AppError::not_found("Image not found"))
    }
}
