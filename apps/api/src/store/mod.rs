//! Analysis persistence — a pluggable sink for finished analyses.
//!
//! `AppState` carries an `Arc<dyn AnalysisStore>`. With `DATABASE_URL` set
//! the service stores into PostgreSQL; without it `DisabledStore` discards
//! records and every read comes back empty.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::models::Profile;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Stores one analysis. Returns its id, or `None` when nothing was stored.
    async fn record(
        &self,
        filename: &str,
        extracted_text: &str,
        profile: &Profile,
    ) -> Result<Option<Uuid>, AppError>;

    /// Most recent analyses first.
    async fn recent(&self, limit: i64) -> Result<Vec<AnalysisRow>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn record(
        &self,
        filename: &str,
        extracted_text: &str,
        profile: &Profile,
    ) -> Result<Option<Uuid>, AppError> {
        let job_fit = serde_json::to_value(&profile.job_fit).context("serializing job fit")?;
        let snapshot = serde_json::to_value(profile).context("serializing profile")?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO analyses (filename, extracted_text, ats_score, skills, job_fit, profile)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(filename)
        .bind(extracted_text)
        .bind(profile.ats_score)
        .bind(&profile.technical_skills)
        .bind(job_fit)
        .bind(snapshot)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(id))
    }

    async fn recent(&self, limit: i64) -> Result<Vec<AnalysisRow>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisRow>(
            "SELECT * FROM analyses ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        Ok(
            sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// No database configured
// ────────────────────────────────────────────────────────────────────────────

pub struct DisabledStore;

#[async_trait]
impl AnalysisStore for DisabledStore {
    async fn record(
        &self,
        _filename: &str,
        _extracted_text: &str,
        _profile: &Profile,
    ) -> Result<Option<Uuid>, AppError> {
        Ok(None)
    }

    async fn recent(&self, _limit: i64) -> Result<Vec<AnalysisRow>, AppError> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        Ok(None)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-process store for handler tests.

    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        rows: Mutex<Vec<AnalysisRow>>,
        fail_writes: bool,
    }

    impl MemoryStore {
        /// A store whose writes always error.
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AnalysisStore for MemoryStore {
        async fn record(
            &self,
            filename: &str,
            extracted_text: &str,
            profile: &Profile,
        ) -> Result<Option<Uuid>, AppError> {
            if self.fail_writes {
                return Err(AppError::Internal(anyhow::anyhow!("store offline")));
            }
            let row = AnalysisRow {
                id: Uuid::new_v4(),
                filename: filename.to_string(),
                extracted_text: extracted_text.to_string(),
                ats_score: profile.ats_score,
                skills: profile.technical_skills.clone(),
                job_fit: serde_json::to_value(&profile.job_fit).context("serializing job fit")?,
                profile: serde_json::to_value(profile).context("serializing profile")?,
                created_at: Utc::now(),
            };
            let id = row.id;
            self.rows.lock().unwrap().push(row);
            Ok(Some(id))
        }

        async fn recent(&self, limit: i64) -> Result<Vec<AnalysisRow>, AppError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .rev()
                .take(limit.max(0) as usize)
                .cloned()
                .collect())
        }

        async fn get(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id == id).cloned())
        }
    }
}
