//! Upload parsing: PDF or JSON file → `ResumeDocument`.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::main_resume::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_ROLE};
use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Json,
}

impl UploadKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            UploadKind::Pdf => "application/pdf",
            UploadKind::Json => "application/json",
        }
    }
}

/// Classifies an upload by extension first, then by declared content type.
/// Anything else is rejected before any parsing happens.
pub fn detect_upload_kind(
    file_name: &str,
    content_type: Option<&str>,
) -> Result<UploadKind, AppError> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        return Ok(UploadKind::Pdf);
    }
    if lower.ends_with(".json") {
        return Ok(UploadKind::Json);
    }
    match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
        Some("application/pdf") => Ok(UploadKind::Pdf),
        Some("application/json") => Ok(UploadKind::Json),
        _ => Err(AppError::Validation(format!(
            "Unsupported file '{file_name}': only PDF and JSON resumes are accepted"
        ))),
    }
}

/// Keeps letters, digits, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Extracts text from a PDF on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;
    Ok(text)
}

/// Turns an upload into a résumé document. JSON that already matches the
/// document shape is taken as-is; everything else goes through the model.
pub async fn parse_upload(
    llm: &LlmClient,
    kind: UploadKind,
    bytes: &[u8],
) -> Result<ResumeDocument, AppError> {
    let text = match kind {
        UploadKind::Pdf => extract_pdf_text(bytes.to_vec()).await?,
        UploadKind::Json => {
            let value: serde_json::Value = serde_json::from_slice(bytes)
                .map_err(|e| AppError::Validation(format!("Invalid JSON file: {e}")))?;
            if let Ok(document) = serde_json::from_value::<ResumeDocument>(value.clone()) {
                if !document.is_blank() {
                    info!("JSON upload already matches the resume schema");
                    return Ok(document);
                }
            }
            serde_json::to_string_pretty(&value).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize upload: {e}"))
            })?
        }
    };

    parse_resume_text(llm, &text).await
}

pub async fn parse_resume_text(llm: &LlmClient, text: &str) -> Result<ResumeDocument, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the uploaded file".to_string(),
        ));
    }

    let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", text);
    llm.ensure_within_context(&prompt).await?;

    let document: ResumeDocument = llm
        .call_json(&prompt, &json_system(RESUME_PARSE_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    if document.is_blank() {
        warn!("Resume parse produced an empty document");
    }
    Ok(document)
}
