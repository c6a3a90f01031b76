use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::models::Profile;
use crate::decode::{decode_document, DocumentKind};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const TEXT_INPUT_NAME: &str = "text-input";
const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

/// Profile plus the envelope fields the frontend expects.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub summary: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// GET /
pub async fn handle_home() -> Json<Value> {
    Json(json!({ "message": "Resume Analyzer API Running" }))
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("Key 'file' missing in request".to_string()))?;
    if filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if DocumentKind::from_filename(&filename).is_none() {
        return Err(AppError::Validation("Invalid file type".to_string()));
    }

    let decode_name = filename.clone();
    let text = tokio::task::spawn_blocking(move || decode_document(&decode_name, &data))
        .await
        .unwrap_or_else(|e| {
            warn!(filename = %filename, error = %e, "decoder panicked, treating as empty");
            String::new()
        });

    run_analysis(&state, &filename, text).await.map(Json)
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    run_analysis(&state, TEXT_INPUT_NAME, req.text).await.map(Json)
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    Ok(Json(state.store.recent(limit).await?))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// Analyzes off the async runtime, then hands the result to the store.
/// A failing store is logged and never fails the request.
async fn run_analysis(
    state: &AppState,
    filename: &str,
    text: String,
) -> Result<AnalysisResponse, AppError> {
    let analyzer = state.analyzer.clone();
    let (text, profile) = tokio::task::spawn_blocking(move || {
        let profile = analyzer.analyze(&text);
        (text, profile)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;

    info!(
        filename,
        word_count = profile.word_count,
        ats_score = profile.ats_score,
        predicted_role = %profile.predicted_role,
        "analysis complete"
    );

    let analysis_id = match state.store.record(filename, &text, &profile).await {
        Ok(id) => id,
        Err(e) => {
            warn!(filename, error = %e, "failed to store analysis");
            None
        }
    };

    Ok(AnalysisResponse {
        profile,
        summary: "Analysis Completed",
        analysis_id,
    })
}
