//! Résumé/job compatibility check.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::jobs::prompts::{COMPATIBILITY_PROMPT_TEMPLATE, COMPATIBILITY_ROLE};
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::LlmClient;
use crate::models::{lenient_number, null_as_default};
use crate::models::resume::ResumeDocument;

/// LLM-produced scoring of résumé-to-job fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityMatrix {
    /// 0 – 100
    #[serde(deserialize_with = "percentage")]
    pub match_percentage: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_reason: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: RequiredSkills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkills {
    #[serde(default, deserialize_with = "null_as_default")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_skills: Vec<String>,
}

fn percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    lenient_number(&value)
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid matchPercentage: {value}")))
}

/// Scores `resume` against `description` with the selected model.
pub async fn check_compatibility(
    llm: &LlmClient,
    description: &str,
    resume: &ResumeDocument,
) -> Result<CompatibilityMatrix, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;

    let prompt = fill_template(
        COMPATIBILITY_PROMPT_TEMPLATE,
        &[("description", description), ("resume_json", &resume_json)],
    );

    llm.ensure_within_context(&prompt).await?;

    llm.call_json(&prompt, &json_system(COMPATIBILITY_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Compatibility check failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mock_llm;

    #[test]
    fn test_percentage_accepts_strings_and_clamps() {
        let m: CompatibilityMatrix =
            serde_json::from_value(serde_json::json!({"matchPercentage": "85%"})).unwrap();
        assert_eq!(m.match_percentage, 85);
        let m: CompatibilityMatrix =
            serde_json::from_value(serde_json::json!({"matchPercentage": 140})).unwrap();
        assert_eq!(m.match_percentage, 100);
        let m: CompatibilityMatrix =
            serde_json::from_value(serde_json::json!({"matchPercentage": -3})).unwrap();
        assert_eq!(m.match_percentage, 0);
    }

    #[test]
    fn test_missing_percentage_is_rejected() {
        let result: Result<CompatibilityMatrix, _> =
            serde_json::from_value(serde_json::json!({"matchReason": "ok"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_skill_lists_default_to_empty() {
        let m: CompatibilityMatrix = serde_json::from_value(serde_json::json!({
            "matchPercentage": 50,
            "matchReason": null,
            "requiredSkills": {"softSkills": null}
        }))
        .unwrap();
        assert_eq!(m.match_percentage, 50);
        assert_eq!(m.match_reason, "");
        assert!(m.required_skills.soft_skills.is_empty());
        assert!(m.required_skills.tech_skills.is_empty());

        let m: CompatibilityMatrix = serde_json::from_value(
            serde_json::json!({"matchPercentage": 10, "requiredSkills": null}),
        )
        .unwrap();
        assert!(m.required_skills.tech_skills.is_empty());
    }

    #[tokio::test]
    async fn test_description_inserted_once_when_resume_contains_placeholder() {
        let (llm, mock) = mock_llm(r#"{"matchPercentage": 40}"#);
        let mut resume = ResumeDocument::default();
        resume.summary = "Ask me about {description}".to_string();
        check_compatibility(&llm, "UNIQUE-POSTING", &resume)
            .await
            .unwrap();
        let prompt = mock.last_prompt().unwrap();
        assert_eq!(prompt.matches("UNIQUE-POSTING").count(), 1);
        assert!(prompt.contains("Ask me about {description}"));
    }

    #[tokio::test]
    async fn test_check_compatibility_parses_model_reply() {
        let (llm, mock) = mock_llm(
            r#"{"matchPercentage": 64, "matchReason": "Strong Rust, no Kafka.",
                "requiredSkills": {"softSkills": ["ownership"], "techSkills": ["Rust", "Kafka"]}}"#,
        );
        let matrix = check_compatibility(&llm, "Rust + Kafka role", &ResumeDocument::default())
            .await
            .unwrap();
        assert_eq!(matrix.match_percentage, 64);
        assert_eq!(matrix.required_skills.tech_skills, vec!["Rust", "Kafka"]);
        assert_eq!(mock.calls(), 1);
        assert!(mock.last_prompt().unwrap().contains("Rust + Kafka role"));
    }
}
