mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use config::StorageConfig;
use repository::{MemoryRepository, NoteRepository, PgRepository};
use service::NoteService;

async fn open_store(storage: &StorageConfig) -> Arc<dyn NoteRepository> {
    match storage {
        StorageConfig::Postgres { dsn } => {
            // Repository creation and migration
            let repo = PgRepository::new(dsn).await.unwrap_or_else(|e| {
                tracing::error!("Failed to establish database connection: {e}");
                panic!("failed to establish database connection: {e}");
            });

            repo.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(repo)
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage, notes will not survive a restart");
            Arc::new(MemoryRepository::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded note-taker config");

    // Store and service creation
    let store = open_store(&cfg.storage).await;
    let service = Arc::new(NoteService::new(store));

    let router = handlers::router(service.clone());

    let listener = tokio::net::TcpListener::bind(cfg.bind_address())
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("listener has no local address");

    tracing::info!("Note taker starting, listening on {}", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }

    service.shutdown().await;
    tracing::info!("Note taker stopped");
}
