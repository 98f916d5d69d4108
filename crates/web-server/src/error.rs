use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] CoreError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Clients get the driver's message verbatim and must treat it as opaque text.
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, db_err.to_string())
            }
            AppError::InvalidRequest(core_err) => {
                tracing::warn!(error = ?core_err, "Rejected request.");
                (StatusCode::BAD_REQUEST, core_err.to_string())
            }
            AppError::NotFound(message) => {
                tracing::warn!(reason = %message, "Not found.");
                (StatusCode::NOT_FOUND, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
