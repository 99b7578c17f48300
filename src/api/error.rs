use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::error::ChainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("blockchain mutex poisoned")]
    Poisoned,

    #[error("mining task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Chain(e) if e.is_rejection() => StatusCode::CONFLICT,
            ApiError::Chain(_) | ApiError::Poisoned | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
