use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurum_api::config::Config;
use aurum_api::repositories::{PgHierarchyStore, SharedStore};
use aurum_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurum_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment(),
        "Starting Aurum API server on port {}",
        config.port
    );
    tracing::info!(
        delay_ms = config.loaders.options.delay.as_millis() as u64,
        max_batch_size = config.loaders.options.max_batch_size,
        failure_policy = ?config.loaders.failure_policy,
        "Batch loader settings"
    );

    let database = config.database();
    tracing::info!(url = %database.redacted_url(), "Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(database.connect_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(database.idle_timeout_secs))
        .connect(&database.url)
        .await?;

    tracing::info!("Database connection established");

    let store: SharedStore = Arc::new(PgHierarchyStore::new(pool));
    let state = AppState::from_config(&config, store);
    let playground = state.playground;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    if playground {
        tracing::info!(
            "GraphQL Playground available at http://{}:{}/graphql/playground",
            addr.ip(),
            addr.port()
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}
