use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; analysis is read-only.
    pub analyzer: Arc<Analyzer>,
    /// Pluggable sink. Default: `DisabledStore`; PostgreSQL when DATABASE_URL is set.
    pub store: Arc<dyn AnalysisStore>,
    pub config: Config,
}
