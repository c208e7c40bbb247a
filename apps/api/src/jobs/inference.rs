//! Job inference: extracts structured fields from a free-text job description.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::jobs::prompts::{
    JOB_INFER_PROMPT_TEMPLATE, JOB_INFER_ROLE, NO_ADDITIONAL_FIELDS,
};
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::LlmClient;
use crate::models::{lenient_number, null_as_default};

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Structured view of a job posting as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredJob {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_of_job: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_remote: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soft_skills: Vec<String>,
    /// 1 (plain) – 5 (heavily dressed up).
    #[serde(default = "default_rating", deserialize_with = "rating")]
    pub sugercoating_rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sugercoating_rating_reason: String,
    /// Caller-requested extra fields, keyed by the requested name.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub additional_fields: Map<String, Value>,
}

fn default_rating() -> u8 {
    MIN_RATING
}

fn rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value)
        .map(|n| n.round().clamp(MIN_RATING as f64, MAX_RATING as f64) as u8)
        .unwrap_or(MIN_RATING))
}

/// Runs job inference against the selected model.
///
/// Fails before any network call when the description is empty or too large
/// for the model's context window.
pub async fn infer_job(
    llm: &LlmClient,
    description: &str,
    additional_fields: &[String],
) -> Result<InferredJob, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    llm.ensure_within_context(description).await?;

    let prompt = build_prompt(description, additional_fields);
    let mut inferred: InferredJob = llm
        .call_json(&prompt, &json_system(JOB_INFER_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Job inference failed: {e}")))?;

    inferred.retain_requested_fields(additional_fields);
    Ok(inferred)
}

fn build_prompt(description: &str, additional_fields: &[String]) -> String {
    let fields: Vec<&str> = additional_fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();

    let additional = if fields.is_empty() {
        NO_ADDITIONAL_FIELDS.to_string()
    } else {
        format!(
            "Also extract these fields into additionalFields, using exactly these keys \
            (use null when the posting does not say): {}",
            fields.join(", ")
        )
    };

    fill_template(
        JOB_INFER_PROMPT_TEMPLATE,
        &[
            ("description", description),
            ("additional_fields", &additional),
        ],
    )
}

impl InferredJob {
    /// Drops extra fields that were not asked for and adds `null` for requested ones
    /// the model left out.
    fn retain_requested_fields(&mut self, requested: &[String]) {
        let requested: Vec<&str> = requested
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        self.additional_fields
            .retain(|key, _| requested.contains(&key.as_str()));
        for field in requested {
            self.additional_fields
                .entry(field.to_string())
                .or_insert(Value::Null);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mock_llm;

    const INFERRED: &str = r#"{
        "companyName": "Acme",
        "jobTitle": "Senior Rust Engineer",
        "typeOfJob": "full-time",
        "isRemote": true,
        "location": "Berlin",
        "technicalSkills": ["Rust", "Postgres"],
        "softSkills": ["communication"],
        "sugercoatingRating": "4",
        "sugercoatingRatingReason": "Lots of 'rockstar' language.",
        "additionalFields": {"salary": "90k", "unrequested": 1}
    }"#;

    #[test]
    fn test_rating_is_clamped_and_lenient() {
        let parsed: InferredJob =
            serde_json::from_value(serde_json::json!({"sugercoatingRating": 9.4})).unwrap();
        assert_eq!(parsed.sugercoating_rating, 5);
        let parsed: InferredJob =
            serde_json::from_value(serde_json::json!({"sugercoatingRating": 0})).unwrap();
        assert_eq!(parsed.sugercoating_rating, 1);
        let parsed: InferredJob = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed.sugercoating_rating, 1);
    }

    #[test]
    fn test_prompt_lists_additional_fields() {
        let prompt = build_prompt("desc", &["salary".into(), " ".into(), "visa".into()]);
        assert!(prompt.contains("salary, visa"));
        assert!(prompt.contains("JOB DESCRIPTION:\ndesc"));
        assert!(!prompt.contains("{additional_fields}"));
    }

    #[test]
    fn test_prompt_without_additional_fields() {
        let prompt = build_prompt("desc", &[]);
        assert!(prompt.contains(NO_ADDITIONAL_FIELDS));
    }

    #[tokio::test]
    async fn test_infer_job_keeps_only_requested_extra_fields() {
        let (llm, mock) = mock_llm(INFERRED);
        let inferred = infer_job(&llm, "We need a Rust engineer", &["salary".into(), "visa".into()])
            .await
            .unwrap();
        assert_eq!(inferred.company_name, "Acme");
        assert_eq!(inferred.sugercoating_rating, 4);
        assert_eq!(inferred.additional_fields["salary"], "90k");
        assert_eq!(inferred.additional_fields["visa"], Value::Null);
        assert!(!inferred.additional_fields.contains_key("unrequested"));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_description_never_reaches_provider() {
        let (llm, mock) = mock_llm(INFERRED);
        let err = infer_job(&llm, "   ", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_null_fields_fall_back_to_defaults() {
        let (llm, _) = mock_llm(
            r#"{"companyName": null, "jobTitle": "Engineer", "isRemote": null,
                "location": null, "technicalSkills": null, "additionalFields": null}"#,
        );
        let inferred = infer_job(&llm, "desc", &["salary".into()]).await.unwrap();
        assert_eq!(inferred.company_name, "");
        assert_eq!(inferred.job_title, "Engineer");
        assert!(!inferred.is_remote);
        assert_eq!(inferred.location, "");
        assert!(inferred.technical_skills.is_empty());
        assert_eq!(inferred.additional_fields["salary"], Value::Null);
    }

    #[test]
    fn test_description_inserted_once_when_fields_contain_placeholder() {
        let prompt = build_prompt("UNIQUE-POSTING", &["{description}".into()]);
        assert_eq!(prompt.matches("UNIQUE-POSTING").count(), 1);
        assert!(prompt.contains("{description}"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_llm_error() {
        let (llm, _) = mock_llm("I cannot help with that");
        let err = infer_job(&llm, "desc", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
