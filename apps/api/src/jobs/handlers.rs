//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::compatibility::{check_compatibility, CompatibilityMatrix};
use crate::jobs::inference::{infer_job, InferredJob};
use crate::jobs::research::{research_company, CompanyResearch};
use crate::jobs::scrape::fetch_page_text;
use crate::models::job::{JobInput, JobRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferRequest {
    pub description: String,
    #[serde(default)]
    pub additional_fields: Vec<String>,
    /// When set, the result is stored on this job, replacing any earlier inference.
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferUrlRequest {
    pub url: String,
    #[serde(default)]
    pub additional_fields: Vec<String>,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferResponse {
    pub inferred_description: InferredJob,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferUrlResponse {
    pub inferred_description: InferredJob,
    /// The scraped page text the inference ran on.
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferMatchRequest {
    pub description: String,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferMatchResponse {
    pub compatibility_matrix: CompatibilityMatrix,
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD
// ────────────────────────────────────────────────────────────────────────────

fn validate_job_input(input: &JobInput) -> Result<(), AppError> {
    if input.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /job
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    validate_job_input(&input)?;
    let job = state.store.create_job(&input).await?;
    info!("Created job {}", job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /job
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(state.store.list_jobs().await?))
}

/// GET /job/:id
///
/// Also records the job in the viewed-jobs cache.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = state
        .store
        .get_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    if let Err(e) = state.viewed_jobs.record(&job).await {
        warn!("Failed to cache viewed job {id}: {e:#}");
    }

    Ok(Json(job))
}

/// PUT /job/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobRow>, AppError> {
    validate_job_input(&input)?;
    let job = state
        .store
        .update_job(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    forget_viewed(&state, id).await;
    Ok(Json(job))
}

/// DELETE /job/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_job(id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    forget_viewed(&state, id).await;
    info!("Deleted job {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /job/viewed
pub async fn handle_viewed_jobs(State(state): State<AppState>) -> Json<Vec<JobRow>> {
    let jobs = state.viewed_jobs.list().await.unwrap_or_else(|e| {
        warn!("Failed to read viewed jobs cache: {e:#}");
        Vec::new()
    });
    Json(jobs)
}

async fn forget_viewed(state: &AppState, id: Uuid) {
    if let Err(e) = state.viewed_jobs.forget(id).await {
        warn!("Failed to evict job {id} from viewed cache: {e:#}");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inference
// ────────────────────────────────────────────────────────────────────────────

/// POST /job/infer
pub async fn handle_infer(
    State(state): State<AppState>,
    Json(request): Json<InferRequest>,
) -> Result<Json<InferResponse>, AppError> {
    let inferred = infer_job(&state.llm, &request.description, &request.additional_fields).await?;
    if let Some(job_id) = request.job_id {
        store_inferred_job(&state, job_id, &inferred).await?;
    }
    Ok(Json(InferResponse {
        inferred_description: inferred,
    }))
}

/// POST /job/infer-url
pub async fn handle_infer_url(
    State(state): State<AppState>,
    Json(request): Json<InferUrlRequest>,
) -> Result<Json<InferUrlResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }
    let description = fetch_page_text(&state.http, &request.url).await?;
    let inferred = infer_job(&state.llm, &description, &request.additional_fields).await?;
    if let Some(job_id) = request.job_id {
        store_inferred_job(&state, job_id, &inferred).await?;
    }
    Ok(Json(InferUrlResponse {
        inferred_description: inferred,
        description,
    }))
}

async fn store_inferred_job(
    state: &AppState,
    job_id: Uuid,
    inferred: &InferredJob,
) -> Result<(), AppError> {
    let value = serde_json::to_value(inferred)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize inference: {e}")))?;
    if !state.store.set_inferred_job(job_id, &value).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    forget_viewed(state, job_id).await;
    Ok(())
}

/// POST /job/infer-match
pub async fn handle_infer_match(
    State(state): State<AppState>,
    Json(request): Json<InferMatchRequest>,
) -> Result<Json<InferMatchResponse>, AppError> {
    let main = state.store.get_main_resume().await?.ok_or_else(|| {
        AppError::NotFound("No main resume found. Upload a resume first.".to_string())
    })?;
    let resume = main
        .document()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored main resume is invalid: {e}")))?;

    let matrix = check_compatibility(&state.llm, &request.description, &resume).await?;

    if let Some(job_id) = request.job_id {
        let value = serde_json::to_value(&matrix).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize compatibility: {e}"))
        })?;
        if !state.store.set_inferred_match(job_id, &value).await? {
            return Err(AppError::NotFound(format!("Job {job_id} not found")));
        }
        forget_viewed(&state, job_id).await;
    }

    Ok(Json(InferMatchResponse {
        compatibility_matrix: matrix,
    }))
}

/// GET /job/research-company/:company_name
pub async fn handle_research_company(
    State(state): State<AppState>,
    Path(company_name): Path<String>,
) -> Result<Json<CompanyResearch>, AppError> {
    let company_name = company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::Validation(
            "companyName cannot be empty".to_string(),
        ));
    }
    Ok(Json(research_company(&state.http, company_name).await))
}
