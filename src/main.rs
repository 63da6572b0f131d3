use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use trip_requests::{
    app,
    config::Config,
    db,
    repository::{PgTripRepository, PgUserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trip_requests=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let port = config.port;

    let state = match config.database_url.clone() {
        Some(url) => {
            let pool = db::create_pool(&url)
                .await
                .context("failed to connect to the database")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run migrations")?;
            tracing::info!("using PostgreSQL storage");
            AppState::new(
                config,
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgTripRepository::new(pool)),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data will be kept in memory only");
            AppState::in_memory(config)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
