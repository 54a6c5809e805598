//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica risorsa.

pub mod address;
pub mod auth;
pub mod client;
pub mod image;
pub mod product;
pub mod supplier;

// Re-exports per facilitare l'import
pub use address::{add_address, get_address_by_id};
pub use auth::{current_principal, login_user, register_user};
pub use client::{
    add_client, change_client_address, delete_client_by_id, get_client_by_id, list_clients,
    search_clients,
};
pub use image::{
    add_image, change_image, delete_image_by_id, get_image_by_id, get_image_by_product_id,
};
pub use product::{
    add_product, delete_product_by_id, get_product_by_id, list_products, reduce_available_stock,
};
pub use supplier::{
    add_supplier, change_supplier_address, delete_supplier_by_id, get_supplier_by_id,
    list_suppliers,
};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = String)),
    tag = "health"
)]
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
