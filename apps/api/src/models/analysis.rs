use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored analysis. `profile` holds the full serialized `Profile`;
/// `skills` and `job_fit` are denormalized copies for querying.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub filename: String,
    pub extracted_text: String,
    pub ats_score: f64,
    pub skills: Vec<String>,
    pub job_fit: Value,
    pub profile: Value,
    pub created_at: DateTime<Utc>,
}
