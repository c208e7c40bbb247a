//! Fakes shared by handler and service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{Config, LlmConfig};
use crate::jobs::cache::memory::MemoryViewedJobs;
use crate::llm_client::{catalog, ChatProvider, ChatRequest, LlmClient, LlmError, ProviderKind};
use crate::state::AppState;
use crate::storage::memory::MemoryFileStore;
use crate::store::memory::MemoryStore;

/// A `ChatProvider` that returns a canned reply and records what it was sent.
pub struct MockProvider {
    reply: Mutex<String>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Mutex::new(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = reply.to_string();
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_model(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(m, _)| m.clone())
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.model.to_string(), request.prompt.to_string()));
        Ok(self.reply.lock().unwrap().clone())
    }
}

/// An `LlmClient` with every provider backed by one mock; Anthropic selected.
pub fn mock_llm(reply: &str) -> (LlmClient, Arc<MockProvider>) {
    let mock = Arc::new(MockProvider::new(reply));
    let providers: HashMap<ProviderKind, Arc<dyn ChatProvider>> = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::Groq,
    ]
    .into_iter()
    .map(|kind| (kind, mock.clone() as Arc<dyn ChatProvider>))
    .collect();
    let llm = LlmClient::with_providers(providers, catalog::default_for(ProviderKind::Anthropic));
    (llm, mock)
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/jobpilot_test".to_string(),
        redis_url: "redis://localhost".to_string(),
        s3_bucket: "jobpilot-test".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        llm: LlmConfig {
            anthropic_api_key: Some("test".to_string()),
            openai_api_key: Some("test".to_string()),
            groq_api_key: Some("test".to_string()),
            provider: ProviderKind::Anthropic,
            model: None,
            timeout_secs: 5,
        },
        viewed_job_ttl_secs: 60,
        chrome_bin: "chromium".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// Application state over in-memory fakes, with handles kept for assertions.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub viewed_jobs: Arc<MemoryViewedJobs>,
    pub files: Arc<MemoryFileStore>,
    pub llm: Arc<MockProvider>,
}

impl TestApp {
    pub fn new(llm_reply: &str) -> Self {
        let store = Arc::new(MemoryStore::default());
        let viewed_jobs = Arc::new(MemoryViewedJobs::default());
        let files = Arc::new(MemoryFileStore::default());
        let (llm, mock) = mock_llm(llm_reply);

        let state = AppState {
            store: store.clone(),
            viewed_jobs: viewed_jobs.clone(),
            files: files.clone(),
            llm,
            http: reqwest::Client::new(),
            config: test_config(),
        };

        Self {
            state,
            store,
            viewed_jobs,
            files,
            llm: mock,
        }
    }
}
