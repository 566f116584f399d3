//! Error handling middleware - `{error, details}` JSON responses.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use postwave_core::DomainError;
use postwave_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to JSON error responses.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    PayloadTooLarge(String),
    Internal { error: String, details: String },
}

impl AppError {
    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        AppError::Internal {
            error: error.into(),
            details: details.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Post not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::Internal { error, details } => write!(f, "{}: {}", error, details),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound => ErrorResponse::not_found(),
            AppError::BadRequest(msg) => ErrorResponse::new(msg.clone()),
            AppError::PayloadTooLarge(details) => ErrorResponse::payload_too_large(details.clone()),
            AppError::Internal { error, details } => {
                tracing::error!(details = %details, "{}", error);
                ErrorResponse::new(error.clone()).with_details(details.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Scheduling(e) => AppError::internal("Failed to schedule post", e.to_string()),
            DomainError::Internal(msg) => AppError::internal("Internal server error", msg),
        }
    }
}

/// Translate JSON extractor failures, mapping body-size overflows to 413.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_error = match &err {
        JsonPayloadError::OverflowKnownLength { length, limit } => AppError::PayloadTooLarge(
            format!("Request body of {length} bytes exceeds the {limit} byte limit. Please use a smaller image."),
        ),
        JsonPayloadError::Overflow { limit } => AppError::PayloadTooLarge(format!(
            "Request body exceeds the {limit} byte limit. Please use a smaller image."
        )),
        _ => AppError::BadRequest(format!("Invalid request body: {}", err)),
    };

    tracing::debug!(error = %err, "Rejected request body");
    app_error.into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
