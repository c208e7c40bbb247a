/// LLM Client: the single point of entry for all model calls in the API.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through `LlmClient`.
///
/// The active provider+model is a process-wide selection, switchable at runtime
/// through `POST /model`. Inputs are checked against the selected model's
/// context window before anything is sent.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub mod catalog;
pub mod handlers;
pub mod prompts;
pub mod providers;
pub mod tokens;

pub use catalog::ModelSpec;
pub use providers::{ChatProvider, ChatRequest, ProviderKind};

use crate::config::LlmConfig;
use providers::anthropic::AnthropicProvider;
use providers::openai::{OpenAiCompatibleProvider, GROQ_BASE_URL, OPENAI_BASE_URL};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Request body cannot be replayed for retry")]
    UnclonableRequest,

    #[error("Unknown LLM provider '{0}'")]
    UnknownProvider(String),

    #[error("Unknown model '{model}' for provider {provider}")]
    UnknownModel { provider: ProviderKind, model: String },

    #[error("Provider {0} is not configured (missing API key)")]
    ProviderUnavailable(ProviderKind),

    #[error("Input is too long for model {model}: {actual} tokens exceeds the limit of {limit} tokens")]
    TokenLimit {
        actual: usize,
        limit: usize,
        model: String,
    },
}

/// The LLM client shared by all services. Cheap to clone.
#[derive(Clone)]
pub struct LlmClient {
    providers: Arc<HashMap<ProviderKind, Arc<dyn ChatProvider>>>,
    selected: Arc<RwLock<&'static ModelSpec>>,
}

impl LlmClient {
    /// Builds one provider per configured API key, all sharing a single HTTP client
    /// with a fixed request timeout.
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build LLM HTTP client")?;

        let mut providers: HashMap<ProviderKind, Arc<dyn ChatProvider>> = HashMap::new();
        if let Some(key) = &config.anthropic_api_key {
            providers.insert(
                ProviderKind::Anthropic,
                Arc::new(AnthropicProvider::new(http.clone(), key.clone())),
            );
        }
        if let Some(key) = &config.openai_api_key {
            providers.insert(
                ProviderKind::OpenAi,
                Arc::new(OpenAiCompatibleProvider::new(
                    http.clone(),
                    OPENAI_BASE_URL,
                    key.clone(),
                )),
            );
        }
        if let Some(key) = &config.groq_api_key {
            providers.insert(
                ProviderKind::Groq,
                Arc::new(OpenAiCompatibleProvider::new(
                    http,
                    GROQ_BASE_URL,
                    key.clone(),
                )),
            );
        }

        let selected = match &config.model {
            Some(model) => catalog::find(config.provider, model).with_context(|| {
                format!("LLM_MODEL '{model}' is not a known {} model", config.provider)
            })?,
            None => catalog::default_for(config.provider),
        };

        if !providers.contains_key(&selected.provider) {
            anyhow::bail!(
                "LLM_PROVIDER is '{}' but no API key is configured for it",
                selected.provider
            );
        }

        Ok(Self::with_providers(providers, selected))
    }

    pub fn with_providers(
        providers: HashMap<ProviderKind, Arc<dyn ChatProvider>>,
        selected: &'static ModelSpec,
    ) -> Self {
        Self {
            providers: Arc::new(providers),
            selected: Arc::new(RwLock::new(selected)),
        }
    }

    pub fn is_available(&self, provider: ProviderKind) -> bool {
        self.providers.contains_key(&provider)
    }

    pub async fn selected_model(&self) -> &'static ModelSpec {
        *self.selected.read().await
    }

    /// Switches the process-wide model. Last writer wins.
    pub async fn select(
        &self,
        provider: ProviderKind,
        model: &str,
    ) -> Result<&'static ModelSpec, LlmError> {
        let spec = catalog::find(provider, model).ok_or_else(|| LlmError::UnknownModel {
            provider,
            model: model.to_string(),
        })?;
        if !self.is_available(provider) {
            return Err(LlmError::ProviderUnavailable(provider));
        }
        *self.selected.write().await = spec;
        info!("LLM model switched to {}/{}", spec.provider, spec.model);
        Ok(spec)
    }

    /// Rejects `text` when its estimated size exceeds the selected model's context window.
    /// Runs before any network call.
    pub async fn ensure_within_context(&self, text: &str) -> Result<(), LlmError> {
        let spec = self.selected_model().await;
        let actual = tokens::estimate_tokens(text);
        if actual > spec.context_window {
            return Err(LlmError::TokenLimit {
                actual,
                limit: spec.context_window,
                model: spec.model.to_string(),
            });
        }
        Ok(())
    }

    /// Sends one system + user turn to the selected model and returns its raw text.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let spec = self.selected_model().await;
        let provider = self
            .providers
            .get(&spec.provider)
            .ok_or(LlmError::ProviderUnavailable(spec.provider))?;

        debug!("LLM call via {}/{}", spec.provider, spec.model);

        provider
            .complete(ChatRequest {
                model: spec.model,
                system,
                prompt,
            })
            .await
    }

    /// Convenience method that calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, system).await?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
