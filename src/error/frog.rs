use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::FormRejection;
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::{debug, error};

#[derive(Debug, ThisError)]
pub enum FrogError {
    #[error("Missing or malformed entry id")]
    MissingEntryId,

    #[error("Entry {0} not found")]
    EntryNotFound(i64),

    #[error("Malformed form body: {0}")]
    MalformedForm(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<FormRejection> for FrogError {
    fn from(rejection: FormRejection) -> Self {
        FrogError::MalformedForm(rejection.to_string())
    }
}

impl IntoResponse for FrogError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            FrogError::MissingEntryId => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "BAD_REQUEST".to_string(),
                    message: "A valid entry id is required.".to_string(),
                },
            ),

            FrogError::MalformedForm(reason) => {
                debug!(reason = %reason, "Rejected malformed form body");
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorObject {
                        code: "BAD_REQUEST".to_string(),
                        message: "The submitted form could not be read.".to_string(),
                    },
                )
            }

            FrogError::EntryNotFound(_) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message: "The requested entry does not exist.".to_string(),
                },
            ),

            err @ (FrogError::DatabaseError(_)
            | FrogError::RactorError(_)
            | FrogError::UnexpectedError(_)) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorObject {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
