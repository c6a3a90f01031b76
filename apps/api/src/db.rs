use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `analyses` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id             UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            filename       TEXT NOT NULL,
            extracted_text TEXT NOT NULL,
            ats_score      DOUBLE PRECISION NOT NULL,
            skills         TEXT[] NOT NULL DEFAULT '{}',
            job_fit        JSONB NOT NULL,
            profile        JSONB NOT NULL,
            created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create analyses table")?;

    info!("analyses table ready");
    Ok(())
}
