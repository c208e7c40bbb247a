//! Axum route handlers for the main résumé singleton.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::main_resume::parse::{detect_upload_kind, parse_upload, sanitize_file_name};
use crate::models::resume::{MainResumeRow, ResumeDocument};
use crate::state::AppState;

/// Object-store prefix for original uploads.
pub const UPLOAD_PREFIX: &str = "main-resume";

/// Upload size cap applied to the multipart route.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const UPLOAD_FIELD: &str = "file";

fn object_key(file_name: &str) -> String {
    format!("{UPLOAD_PREFIX}/{file_name}")
}

/// GET /main-resume
pub async fn handle_get_main_resume(
    State(state): State<AppState>,
) -> Result<Json<MainResumeRow>, AppError> {
    let row = state
        .store
        .get_main_resume()
        .await?
        .ok_or_else(|| AppError::NotFound("No main resume found. Upload a resume first.".to_string()))?;
    Ok(Json(row))
}

/// POST /main-resume (multipart, field `file`)
///
/// The file type is checked before anything is parsed. On success the original
/// is kept in object storage and the main résumé is replaced. If the database
/// write fails the stored original is removed again.
pub async fn handle_upload_main_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MainResumeRow>), AppError> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, data));
        break;
    }

    let (file_name, content_type, data) = upload.ok_or_else(|| {
        AppError::Validation(format!("Multipart field '{UPLOAD_FIELD}' is required"))
    })?;

    let kind = detect_upload_kind(&file_name, content_type.as_deref())?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    info!("Parsing uploaded resume '{file_name}' ({} bytes, {kind:?})", data.len());

    let document = parse_upload(&state.llm, kind, &data).await?;
    let resume = to_json(&document)?;

    let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&file_name));
    let key = object_key(&stored_name);
    state.files.put(&key, data, kind.content_type()).await?;

    let row = match state.store.put_main_resume(&resume, Some(&stored_name)).await {
        Ok(row) => row,
        Err(e) => {
            if let Err(cleanup) = state.files.delete(&key).await {
                warn!("Failed to remove orphaned upload {key}: {cleanup}");
            }
            return Err(e.into());
        }
    };
    info!("Main resume replaced from upload {stored_name}");

    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /main-resume
///
/// Full structured replace. The stored original file is kept.
pub async fn handle_put_main_resume(
    State(state): State<AppState>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<MainResumeRow>, AppError> {
    let resume = to_json(&document)?;
    let row = state.store.put_main_resume(&resume, None).await?;
    info!("Main resume replaced via PUT");
    Ok(Json(row))
}

/// GET /main-resume/file/:file_name
pub async fn handle_download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if file_name.is_empty() || sanitize_file_name(&file_name) != file_name {
        return Err(AppError::Validation(format!("Invalid file name '{file_name}'")));
    }

    let stored = state
        .files
        .get(&object_key(&file_name))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File {file_name} not found")))?;

    let content_type = stored
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        stored.bytes,
    ))
}

fn to_json(document: &ResumeDocument) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))
}
