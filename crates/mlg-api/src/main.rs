//! MultiLingo API — string analysis, natural-language filtering, chat and
//! translation REST server.

use std::sync::Arc;

use mlg_api::config::ApiConfig;
use mlg_api::state::AppState;
use mlg_api::{db, routes};
use mlg_translate::{HttpTranslator, Translator};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mlg-api starting");

    let config = ApiConfig::from_env();
    let translator = Arc::new(HttpTranslator::new(config.translator_config())?);
    tracing::info!(
        translator = translator.name(),
        base_url = %config.translate_base_url,
        "translation backend ready"
    );

    // Connect to PostgreSQL if DATABASE_URL is set, otherwise use in-memory state.
    let state = if let Some(database_url) = &config.database_url {
        tracing::info!(pool_size = config.database_pool_size, "connecting to PostgreSQL");
        let pool = db::connect(database_url, config.database_pool_size).await?;
        AppState::with_pool(pool, translator, &config)
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage");
        AppState::in_memory(translator, &config)
    };

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
