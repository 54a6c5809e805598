use shop_server::core::{AppState, Config, TokenService};
use shop_server::create_router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging (RUST_LOG sovrascrive il filtro di default)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Carica la configurazione dalle variabili d'ambiente
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    config.log_info();

    // Crea il pool di connessioni
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .max_lifetime(config.connection_lifetime())
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to the database: {}", e);
            e
        })?;
    info!("Database connection pool ready");

    // Applica le migrations pendenti
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    let tokens = TokenService::new(config.jwt_secret.as_deref(), config.jwt_ttl());
    let state = AppState::new(pool, tokens).with_max_image_bytes(config.max_image_bytes);

    let app = create_router(Arc::new(state)).layer(TimeoutLayer::new(config.request_timeout()));

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // senza segnale il server resta attivo finché il processo non viene terminato
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
