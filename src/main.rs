//! API server: loads settings, checks the database, serves until SIGINT/SIGTERM.

use api_starter::{build_router, logging, serve, store, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_err() {
        eprintln!("no .env file found, using environment variables");
    }

    let settings = Settings::from_env();
    logging::init(&settings.logging, !settings.app.is_production())?;

    let database_url = settings.require_database_url().map_err(|e| {
        tracing::error!(error = %e, "missing configuration");
        e
    })?;
    let options = store::parse_database_url(database_url)?;
    let pool = store::connect(options, 5, store::CONNECT_TIMEOUT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "database ping failed");
            e
        })?;

    let addr = settings.app.bind_address();
    tracing::info!(
        app = %settings.app.name,
        env = %settings.app.env,
        "starting server on {}",
        addr
    );

    let app = build_router(AppState::new(pool, settings));
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!(error = %e, address = %addr, "failed to bind");
        e
    })?;
    tracing::info!("listening on {}", listener.local_addr()?);
    serve(listener, app).await?;
    Ok(())
}
