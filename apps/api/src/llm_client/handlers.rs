//! Model listing and selection endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::catalog::{ModelSpec, CATALOG};
use super::ProviderKind;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    #[serde(flatten)]
    pub spec: &'static ModelSpec,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub selected: &'static ModelSpec,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SelectModelRequest {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct SelectModelResponse {
    pub selected: &'static ModelSpec,
}

/// GET /models
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = CATALOG
        .iter()
        .map(|spec| ModelEntry {
            spec,
            available: state.llm.is_available(spec.provider),
        })
        .collect();

    Json(ModelsResponse {
        selected: state.llm.selected_model().await,
        models,
    })
}

/// POST /model
pub async fn handle_select_model(
    State(state): State<AppState>,
    Json(request): Json<SelectModelRequest>,
) -> Result<Json<SelectModelResponse>, AppError> {
    let provider: ProviderKind = request
        .provider
        .parse()
        .map_err(|e: super::LlmError| AppError::Validation(e.to_string()))?;

    let selected = state.llm.select(provider, request.model.trim()).await?;

    Ok(Json(SelectModelResponse { selected }))
}
