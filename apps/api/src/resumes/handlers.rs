//! Axum route handlers for saved résumés and tailoring.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, SavedResumeInput, SavedResumeRow};
use crate::resumes::print::print_pdf;
use crate::resumes::render::render_html;
use crate::resumes::tailoring::{tailor_resume, GenerateRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResumesQuery {
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume: ResumeDocument,
}

/// Rejects snapshots pointing at a job that does not exist (or was deleted).
async fn ensure_job_exists(state: &AppState, input: &SavedResumeInput) -> Result<(), AppError> {
    if let Some(job_id) = input.job_id {
        if state.store.get_job(job_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Job {job_id} not found")));
        }
    }
    Ok(())
}

async fn load_resume(state: &AppState, id: Uuid) -> Result<SavedResumeRow, AppError> {
    state
        .store
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// POST /resume
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(input): Json<SavedResumeInput>,
) -> Result<(StatusCode, Json<SavedResumeRow>), AppError> {
    ensure_job_exists(&state, &input).await?;
    let row = state.store.create_resume(&input).await?;
    info!("Saved resume {} for job {:?}", row.id, row.job_id);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /resume?jobId=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(query): Query<ListResumesQuery>,
) -> Result<Json<Vec<SavedResumeRow>>, AppError> {
    Ok(Json(state.store.list_resumes(query.job_id).await?))
}

/// GET /resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedResumeRow>, AppError> {
    Ok(Json(load_resume(&state, id).await?))
}

/// PUT /resume/:id
///
/// Replaces the whole snapshot.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SavedResumeInput>,
) -> Result<Json<SavedResumeRow>, AppError> {
    ensure_job_exists(&state, &input).await?;
    let row = state
        .store
        .update_resume(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_resume(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /resume/generate
///
/// Tailors the main résumé using the supplied compatibility analysis. Nothing is
/// persisted; clients save the result through `POST /resume`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let main = state.store.get_main_resume().await?.ok_or_else(|| {
        AppError::NotFound("No main resume found. Upload a resume first.".to_string())
    })?;
    let resume = main
        .document()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored main resume is invalid: {e}")))?;

    let tailored = tailor_resume(&state.llm, &resume, &request).await?;
    Ok(Json(GenerateResponse { resume: tailored }))
}

fn saved_document(row: &SavedResumeRow) -> Result<ResumeDocument, AppError> {
    let mut document = row.document().map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Stored resume {} is invalid: {e}", row.id))
    })?;
    if document.cover_letter.is_none() {
        document.cover_letter = row.cover_letter.clone();
    }
    Ok(document)
}

/// GET /resume/html/:id
pub async fn handle_resume_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let row = load_resume(&state, id).await?;
    Ok(Html(render_html(&saved_document(&row)?)))
}

/// GET /resume/print/:id
pub async fn handle_resume_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = load_resume(&state, id).await?;
    let html = render_html(&saved_document(&row)?);
    let pdf = print_pdf(&state.config.chrome_bin, &html).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"resume-{id}.pdf\""),
            ),
        ],
        pdf,
    ))
}
