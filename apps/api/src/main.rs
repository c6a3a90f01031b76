mod analysis;
mod config;
mod db;
mod decode;
mod errors;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::Analyzer;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{AnalysisStore, DisabledStore, PgAnalysisStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Analyzer tables: compiled-in defaults, optionally overridden from TOML
    let analyzer_config = match &config.analyzer_config {
        Some(path) => {
            info!("Loading analyzer tables from {}", path.display());
            AnalyzerConfig::load(path)?
        }
        None => AnalyzerConfig::default(),
    };
    let analyzer = Arc::new(Analyzer::new(analyzer_config));

    // Initialize the analysis store (PostgreSQL when configured)
    let store: Arc<dyn AnalysisStore> = match &config.database_url {
        Some(url) => {
            let db = create_pool(url).await?;
            ensure_schema(&db).await?;
            Arc::new(PgAnalysisStore::new(db))
        }
        None => {
            info!("DATABASE_URL not set; analyses will not be stored");
            Arc::new(DisabledStore)
        }
    };

    // Build app state
    let state = AppState {
        analyzer,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
