//! Plotline API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use plotline_api::error::AppError;
use plotline_api::{routes, state};
use plotline_dualstore::{DualStoreConfig, DualStoreCoordinator, PolicyResolver};
use plotline_pg_store::{PgContentRepository, PgPrimaryStore, schema};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Plotline API server");

    // Read configuration from environment. Policy is decided here, once,
    // and passed in as an explicit value.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let query_database_url =
        std::env::var("QUERY_DATABASE_URL").unwrap_or_else(|_| database_url.clone());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let strict_consistency = std::env::var("STRICT_CONSISTENCY")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
        .unwrap_or(false);

    // Create one connection pool per store.
    let primary_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    let query_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&query_database_url)
        .await?;

    schema::ensure_primary_schema(&primary_pool).await?;
    schema::ensure_secondary_schema(&query_pool).await?;

    // Build the coordinator with explicitly injected store clients.
    let coordinator = DualStoreCoordinator::new(
        Arc::new(PgPrimaryStore::new(primary_pool)),
        Arc::new(PgContentRepository::new(query_pool)),
        PolicyResolver::new(DualStoreConfig { strict_consistency }),
    );
    let app_state = state::AppState::new(coordinator);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/content", routes::content::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
