use anyhow::Result;
use std::sync::Arc;
use tracing::info;

mod app;
mod config;
mod error;
mod middleware;
mod realtime;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting deskbell API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool (retries with backoff; exits on exhaustion)
    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    let store: Arc<dyn persistence::store::RequestStore> =
        Arc::new(persistence::repositories::PgRequestStore::new(pool));
    let sessions: Arc<dyn services::session::SessionStore> =
        Arc::new(services::session::InMemorySessionStore::new(
            std::time::Duration::from_secs(config.session.expiry_margin_secs),
        ));

    let addr = config.socket_addr();
    let state = app::build_state(config, store, sessions);
    let app = app::create_app(state);

    // Start server
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
