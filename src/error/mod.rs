use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InvalidInput(_) => HttpResponse::BadRequest().json(ErrorResponse {
                error: self.to_string(),
            }),
            // Server-side failures are logged with full detail but reported
            // to the caller with a generic message only.
            ApiError::ExternalServiceError(detail) => {
                error!("External service failure: {}", detail);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process the request".to_string(),
                })
            }
            ApiError::InternalError(detail) => {
                error!("Internal error: {}", detail);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process the request".to_string(),
                })
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::ExternalServiceError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
