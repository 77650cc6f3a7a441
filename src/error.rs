use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::service::validator::Violations;

#[derive(Debug, ThisError)]
pub enum ServiceError {
    #[error("{0}")]
    DatabaseError(#[from] SqlxError),

    #[error("{0}")]
    Validation(Violations),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid request")]
    InvalidRequest,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request timed out")]
    Timeout,

    #[error("Config error: {0}")]
    Config(#[from] figment::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidRequest => StatusCode::BAD_REQUEST,
            ServiceError::UserNotFound => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServiceError::DatabaseError(_) | ServiceError::Config(_) | ServiceError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors leave the service as plain text; the status code carries the meaning.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
