use anyhow::{bail, Context, Result};

use crate::llm_client::ProviderKind;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub llm: LlmConfig,
    /// Expiry of entries in the viewed-jobs cache.
    pub viewed_job_ttl_secs: u64,
    /// Headless browser used by the print endpoint.
    pub chrome_bin: String,
    pub port: u16,
    pub rust_log: String,
}

/// Provider credentials and the initial model selection.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub provider: ProviderKind,
    /// `None` picks the catalog default for `provider`.
    pub model: Option<String>,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm = LlmConfig {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            provider: optional_env("LLM_PROVIDER")
                .as_deref()
                .unwrap_or("anthropic")
                .parse()
                .context("LLM_PROVIDER must be one of: anthropic, openai, groq")?,
            model: optional_env("LLM_MODEL"),
            timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
        };

        if llm.anthropic_api_key.is_none()
            && llm.openai_api_key.is_none()
            && llm.groq_api_key.is_none()
        {
            bail!("At least one of ANTHROPIC_API_KEY, OPENAI_API_KEY or GROQ_API_KEY must be set");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            llm,
            viewed_job_ttl_secs: parse_env("VIEWED_JOB_TTL_SECS", 86_400)?,
            chrome_bin: optional_env("CHROME_BIN").unwrap_or_else(|| "chromium".to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset_or_blank() {
        std::env::remove_var("JOBPILOT_TEST_UNSET_PORT");
        assert_eq!(parse_env("JOBPILOT_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);

        std::env::set_var("JOBPILOT_TEST_BLANK_TTL", "  ");
        assert_eq!(parse_env("JOBPILOT_TEST_BLANK_TTL", 60u64).unwrap(), 60);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBPILOT_TEST_BAD_TIMEOUT", "soon");
        let err = parse_env("JOBPILOT_TEST_BAD_TIMEOUT", 120u64).unwrap_err();
        assert!(err.to_string().contains("JOBPILOT_TEST_BAD_TIMEOUT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        std::env::remove_var("JOBPILOT_TEST_MISSING_URL");
        let err = require_env("JOBPILOT_TEST_MISSING_URL").unwrap_err();
        assert!(err.to_string().contains("JOBPILOT_TEST_MISSING_URL"));
    }
}
