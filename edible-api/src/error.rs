use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use edible_order::{DraftError, ReviewError, SubmissionError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ForbiddenError(String),
    ValidationError(String),
    ConflictError(String),
    UpstreamError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ForbiddenError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UpstreamError(msg) => {
                tracing::warn!("Backend failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        let message = err.to_string();
        match err {
            SubmissionError::Rejected(_) => AppError::ForbiddenError(message),
            SubmissionError::Validation(_) => AppError::ValidationError(message),
            SubmissionError::Stock(_) => AppError::ConflictError(message),
            SubmissionError::Persistence(_) => AppError::UpstreamError(message),
        }
    }
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}
