use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::api::{ErrorBody, ErrorResponse};
use crate::book_service::BookServiceError;
use crate::validation::ValidationErrors;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Every failure a books endpoint can report to the client
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] BookServiceError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    /// Maps the error to the status code and body sent to the client
    pub fn translate(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Service(err @ BookServiceError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                ErrorBody::Single(ErrorResponse::new(err.to_string())),
            ),
            ApiError::Service(err @ BookServiceError::DuplicateBook(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::Single(ErrorResponse::new(err.to_string())),
            ),
            ApiError::Service(BookServiceError::Repository(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::Single(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
            ),
            ApiError::Validation(ValidationErrors(messages)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::Fields(messages.iter().map(ErrorResponse::new).collect()),
            ),
            ApiError::MalformedBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::Fields(vec![ErrorResponse::new(message.clone())]),
            ),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.translate().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = self.translate();
        if status.is_server_error() {
            tracing::error!("Request failed {}", self);
        }
        HttpResponse::build(status).json(body)
    }
}
