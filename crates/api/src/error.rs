use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tourbook_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors (validation, not found) and adds
/// store, asset, and HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tourbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing an image asset failed.
    #[error("Asset storage error: {0}")]
    Asset(#[from] std::io::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// A missing tour, as a 404.
    pub fn tour_not_found(id: tourbook_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity: "Tour", id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut field = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation { field: name, message }) => {
                field = Some(name.clone());
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),

            // --- Store errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            // --- Asset errors ---
            AppError::Asset(err) => {
                tracing::error!(error = %err, "Asset storage error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Sanitized 500 triple; the cause is logged, never returned.
fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
