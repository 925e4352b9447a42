use dotenvy::dotenv;
use institute_core::{
    api::{AppState, build_router},
    config::{content::load_seed_if_present, database, server::ServerConfig},
    core::content,
    errors::Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load server settings
    let config = ServerConfig::from_env()
        .inspect_err(|e| error!("Failed to load server configuration: {}", e))?;
    info!(bind_addr = %config.bind_addr, "Loaded server configuration");

    // 4. Connect (retries until the database is reachable) and ensure tables
    let db = database::connect_with_retry(&config.database_url, config.connect_retry_delay).await;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed default content without overwriting edits
    let seed = load_seed_if_present(&config.content_seed_path)
        .inspect_err(|e| error!("Failed to load content seed: {}", e))?;
    content::seed_defaults(&db, &seed.entries).await?;

    // 6. Serve until Ctrl-C, then close the pool
    let state = AppState {
        max_body_bytes: config.max_body_bytes,
        ..AppState::new(db)
    };
    let db = Arc::clone(&state.db);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing database connection");
    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await?,
        Err(_) => warn!("Database connection still shared at shutdown, dropping it"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
