use std::sync::Arc;

use crate::config::Config;
use crate::jobs::cache::ViewedJobs;
use crate::llm_client::LlmClient;
use crate::storage::FileStore;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Recently opened jobs. Best-effort; failures never fail a request.
    pub viewed_jobs: Arc<dyn ViewedJobs>,
    /// Original résumé uploads.
    pub files: Arc<dyn FileStore>,
    pub llm: LlmClient,
    /// Outbound client for page scraping and company research.
    pub http: reqwest::Client,
    pub config: Config,
}
