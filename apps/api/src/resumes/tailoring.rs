//! Résumé tailoring: rewrites the main résumé against a compatibility analysis.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeDocument;
use crate::resumes::prompts::{
    COVER_LETTER_INSTRUCTION, NO_COVER_LETTER_INSTRUCTION, TAILOR_PROMPT_TEMPLATE, TAILOR_ROLE,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Usually the `compatibilityMatrix` returned by `/job/infer-match`. Passed
    /// through to the model as-is.
    pub job_compatibility_data: Value,
    #[serde(default)]
    pub generate_cover_letter: bool,
}

pub async fn tailor_resume(
    llm: &LlmClient,
    resume: &ResumeDocument,
    request: &GenerateRequest,
) -> Result<ResumeDocument, AppError> {
    if request.job_compatibility_data.is_null() {
        return Err(AppError::Validation(
            "jobCompatibilityData is required".to_string(),
        ));
    }

    let prompt = build_prompt(resume, request)?;
    llm.ensure_within_context(&prompt).await?;

    let mut tailored: ResumeDocument = llm
        .call_json(&prompt, &json_system(TAILOR_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))?;

    if !request.generate_cover_letter {
        tailored.cover_letter = None;
    }
    info!(
        "Tailored resume: {} technical skills, {} roles, cover letter: {}",
        tailored.skills.technical.len(),
        tailored.work_experience.len(),
        tailored.cover_letter.is_some()
    );
    Ok(tailored)
}

fn build_prompt(resume: &ResumeDocument, request: &GenerateRequest) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;
    let compatibility_json = serde_json::to_string_pretty(&request.job_compatibility_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize compatibility: {e}")))?;
    let cover_letter = if request.generate_cover_letter {
        COVER_LETTER_INSTRUCTION
    } else {
        NO_COVER_LETTER_INSTRUCTION
    };

    Ok(fill_template(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("resume_json", &resume_json),
            ("compatibility_json", &compatibility_json),
            ("cover_letter_instruction", cover_letter),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mock_llm;

    const TAILORED: &str = r#"{
        "contact": {"name": "Ada"},
        "summary": "Rust engineer.",
        "skills": {"technical": ["Rust"], "soft": []},
        "coverLetter": "Dear hiring manager"
    }"#;

    fn request(cover_letter: bool) -> GenerateRequest {
        GenerateRequest {
            job_compatibility_data: serde_json::json!({"matchPercentage": 70}),
            generate_cover_letter: cover_letter,
        }
    }

    #[tokio::test]
    async fn test_cover_letter_dropped_when_not_requested() {
        let (llm, mock) = mock_llm(TAILORED);
        let tailored = tailor_resume(&llm, &ResumeDocument::default(), &request(false))
            .await
            .unwrap();
        assert!(tailored.cover_letter.is_none());
        assert!(mock.last_prompt().unwrap().contains(NO_COVER_LETTER_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_cover_letter_kept_when_requested() {
        let (llm, _) = mock_llm(TAILORED);
        let tailored = tailor_resume(&llm, &ResumeDocument::default(), &request(true))
            .await
            .unwrap();
        assert_eq!(tailored.cover_letter.as_deref(), Some("Dear hiring manager"));
        assert_eq!(tailored.skills.technical, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_missing_compatibility_data_is_rejected() {
        let (llm, mock) = mock_llm(TAILORED);
        let req = GenerateRequest {
            job_compatibility_data: Value::Null,
            generate_cover_letter: false,
        };
        let err = tailor_resume(&llm, &ResumeDocument::default(), &req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_resume_text_with_placeholder_is_not_expanded() {
        let mut resume = ResumeDocument::default();
        resume.summary = "Literal {compatibility_json} here".to_string();
        let prompt = build_prompt(&resume, &request(false)).unwrap();
        assert_eq!(prompt.matches("\"matchPercentage\": 70").count(), 1);
        assert!(prompt.contains("Literal {compatibility_json} here"));
    }

    #[test]
    fn test_prompt_embeds_resume_and_analysis() {
        let mut resume = ResumeDocument::default();
        resume.contact.name = "Grace Hopper".to_string();
        let prompt = build_prompt(&resume, &request(true)).unwrap();
        assert!(prompt.contains("Grace Hopper"));
        assert!(prompt.contains("\"matchPercentage\": 70"));
        assert!(prompt.contains(COVER_LETTER_INSTRUCTION));
    }
}
