use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(
        "Input is too long for model {model}: {actual} tokens exceeds the limit of {limit} tokens"
    )]
    TokenLimit {
        actual: usize,
        limit: usize,
        model: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::TokenLimit {
                actual,
                limit,
                model,
            } => AppError::TokenLimit {
                actual,
                limit,
                model,
            },
            LlmError::UnknownModel { .. } | LlmError::ProviderUnavailable(_) => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::TokenLimit { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "TOKEN_LIMIT_EXCEEDED",
                self.to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR", msg.clone())
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    msg.clone(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    format!("{e:#}"),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_limit_message_names_both_counts() {
        let err = AppError::TokenLimit {
            actual: 25_000,
            limit: 16_385,
            model: "gpt-3.5-turbo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("25000"));
        assert!(msg.contains("16385"));
        assert!(msg.contains("gpt-3.5-turbo"));
    }

    #[test]
    fn test_status_codes_by_kind() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Llm("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::TokenLimit {
                    actual: 2,
                    limit: 1,
                    model: "m".into(),
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_llm_token_limit_maps_to_token_limit() {
        let err: AppError = LlmError::TokenLimit {
            actual: 10,
            limit: 5,
            model: "m".into(),
        }
        .into();
        assert!(matches!(
            err,
            AppError::TokenLimit {
                actual: 10,
                limit: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_provider_api_error_is_passed_through() {
        let err: AppError = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".into(),
        }
        .into();
        match err {
            AppError::Llm(msg) => assert!(msg.contains("invalid x-api-key")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
