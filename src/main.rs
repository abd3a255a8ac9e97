// src/main.rs
use dotenvy::dotenv;
use stockroom::{config::Config, create_router, database, server::bind_listener, AppState, Catalog};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables before the filter reads RUST_LOG
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    let catalog = match &config.database_url {
        Some(url) => {
            let pool = match database::create_pool(url, config.max_connections).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create database pool");
                    return;
                }
            };
            if let Err(e) = database::run_migrations(&pool).await {
                tracing::error!(error = %e, "Failed to run database migrations");
                return;
            }
            Catalog::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory and lost on exit");
            Catalog::in_memory()
        }
    };
    tracing::info!(backend = catalog.backend(), "Catalog ready");

    let app = create_router(AppState::new(catalog));

    let Some(listener) = bind_listener(&config).await else {
        tracing::error!(host = %config.host, port = config.port, "No free port in range");
        return;
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
