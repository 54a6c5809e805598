//! Server library - espone i moduli principali per i test

pub mod core;
pub mod docs;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/v1", configure_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Tutte le route sotto /api/v1
fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", configure_auth_routes(state.clone()))
        .nest("/addresses", configure_address_routes(state.clone()))
        .nest("/clients", configure_client_routes(state.clone()))
        .nest("/suppliers", configure_supplier_routes(state.clone()))
        .nest("/products", configure_product_routes(state.clone()))
        .nest("/images", configure_image_routes(state))
}

/// Configura le routes di autenticazione (login, register pubbliche; me protetta)
fn configure_auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    let public_routes = Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user));

    let protected_routes = Router::new()
        .route("/me", get(current_principal))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// Configura le routes per gli indirizzi
fn configure_address_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", post(add_address))
        .route("/{id}", get(get_address_by_id))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per i clienti
fn configure_client_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route(
            "/",
            get(list_clients)
                .post(add_client)
                .delete(delete_client_by_id),
        )
        .route("/search", get(search_clients))
        .route("/{id}", get(get_client_by_id))
        .route("/{id}/address", patch(change_client_address))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per i fornitori
fn configure_supplier_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route(
            "/",
            get(list_suppliers)
                .post(add_supplier)
                .delete(delete_supplier_by_id),
        )
        .route("/{id}", get(get_supplier_by_id))
        .route("/{id}/address", patch(change_supplier_address))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per i prodotti
fn configure_product_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(add_product)
                .delete(delete_product_by_id),
        )
        .route("/{id}", get(get_product_by_id))
        .route("/{id}/available-stock", patch(reduce_available_stock))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per le immagini (body binario con limite di dimensione)
fn configure_image_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    let max_image_bytes = state.max_image_bytes;
    Router::new()
        .route("/", post(add_image).delete(delete_image_by_id))
        .route("/{id}", get(get_image_by_id).patch(change_image))
        .route("/products/{product_id}", get(get_image_by_product_id))
        .layer(DefaultBodyLimit::max(max_image_bytes))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
