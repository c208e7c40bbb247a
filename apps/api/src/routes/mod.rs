pub mod health;


use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::llm_client::handlers as models;
use crate::main_resume::handlers as main_resume;
use crate::migrations;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::handle_list_jobs).post(jobs::handle_create_job))
        .route("/viewed", get(jobs::handle_viewed_jobs))
        .route("/infer", post(jobs::handle_infer))
        .route("/infer-url", post(jobs::handle_infer_url))
        .route("/infer-match", post(jobs::handle_infer_match))
        .route(
            "/research-company/:company_name",
            get(jobs::handle_research_company),
        )
        .route(
            "/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
}

fn resume_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route("/generate", post(resumes::handle_generate))
        .route("/html/:id", get(resumes::handle_resume_html))
        .route("/print/:id", get(resumes::handle_resume_print))
        .route(
            "/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
}

fn main_resume_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(main_resume::handle_get_main_resume)
                .post(main_resume::handle_upload_main_resume)
                .put(main_resume::handle_put_main_resume),
        )
        .route("/file/:file_name", get(main_resume::handle_download_file))
        .layer(DefaultBodyLimit::max(main_resume::MAX_UPLOAD_BYTES))
}

/// Every feature router is mounted under both path spellings clients use.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/job", job_routes())
        .nest("/jobs", job_routes())
        .nest("/resume", resume_routes())
        .nest("/resumes", resume_routes())
        .nest("/main-resume", main_resume_routes())
        .nest("/mainResume", main_resume_routes())
        .route("/models", get(models::handle_list_models))
        .route("/model", post(models::handle_select_model))
        .route("/migrate", post(migrations::handle_migrate_all))
        .route("/migrate/:from/:to", post(migrations::handle_migrate_range))
        .with_state(state)
}
