//! Sweet Shop API server

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use sweetshop_api::{create_router, state::AppState};
use sweetshop_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sweetshop_api={level},tower_http={level}",
            level = config.logging.level
        ))
    });
    if config.logging.json_format {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!(url = %config.database.url, "database ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, db_pool));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Sweet Shop API listening on http://{addr}");
    tracing::info!("OpenAPI spec at http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app).await?;

    Ok(())
}
