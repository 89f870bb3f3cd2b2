use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

const RETRY_LATER: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid input: {} field error(s)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::Invalid(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if code == "2067" || code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Entry already exists (duplicate entry)" }))
                        ).into_response();
                    }

                    // 787 = SQLite Foreign Key Constraint
                    // 23503 = PostgreSQL Foreign Key Violation
                    if code == "787" || code == "23503" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Entry is still referenced by other records" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, RETRY_LATER.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Invalid(fields) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Validation failed", "fields": fields }))
                ).into_response();
            }
            AppError::ConcurrencyConflict(msg) => {
                error!("Unresolved concurrency conflict: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, RETRY_LATER.to_string())
            }
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, RETRY_LATER.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Failures that stop the service before it starts accepting requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
