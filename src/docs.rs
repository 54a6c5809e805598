//! OpenAPI - Documento generato dalle annotazioni `#[utoipa::path]` degli handler

use crate::core::Principal;
use crate::dtos::{
    AddressDTO, ClientDTO, CreateAddressDTO, CreateClientDTO, CreateProductDTO, CreateSupplierDTO,
    CreateUserDTO, LoginDTO, ProductDTO, SupplierDTO, TokenResponseDTO, UserDTO,
};
use crate::services;
use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registra lo schema `bearer_auth` usato dalle route protette
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            let bearer = Http::builder()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .build();
            components.add_security_scheme("bearer_auth", SecurityScheme::Http(bearer));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        description = "CRUD API for clients, suppliers, products and images, \
                       secured with JWT bearer tokens"
    ),
    paths(
        services::root,
        services::auth::register_user,
        services::auth::login_user,
        services::auth::current_principal,
        services::address::add_address,
        services::address::get_address_by_id,
        services::client::add_client,
        services::client::get_client_by_id,
        services::client::list_clients,
        services::client::search_clients,
        services::client::change_client_address,
        services::client::delete_client_by_id,
        services::supplier::add_supplier,
        services::supplier::list_suppliers,
        services::supplier::get_supplier_by_id,
        services::supplier::change_supplier_address,
        services::supplier::delete_supplier_by_id,
        services::product::add_product,
        services::product::reduce_available_stock,
        services::product::get_product_by_id,
        services::product::list_products,
        services::product::delete_product_by_id,
        services::image::add_image,
        services::image::change_image,
        services::image::get_image_by_id,
        services::image::get_image_by_product_id,
        services::image::delete_image_by_id,
    ),
    components(schemas(
        Principal,
        UserDTO,
        CreateUserDTO,
        LoginDTO,
        TokenResponseDTO,
        AddressDTO,
        CreateAddressDTO,
        ClientDTO,
        CreateClientDTO,
        SupplierDTO,
        CreateSupplierDTO,
        ProductDTO,
        CreateProductDTO,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Registration, login and token introspection"),
        (name = "addresses", description = "Postal addresses"),
        (name = "clients", description = "Shop clients"),
        (name = "suppliers", description = "Product suppliers"),
        (name = "products", description = "Catalogue and stock"),
        (name = "images", description = "Raw product images"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
