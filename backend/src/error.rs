//! Domain error taxonomy and HTTP translation.
//!
//! Every handler-level failure is mapped to a JSON `{error}` body with an
//! appropriate status. There are no structured error codes beyond the status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Access denied")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Federated identity verification failed")]
    FederationVerificationFailed,

    #[error("Admin access required")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Insufficient balance: cost {cost} exceeds balance {balance}")]
    InsufficientBalance { cost: i64, balance: i64 },

    #[error("Storage error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn status(&self) -> StatusCode {
        match self {
            DomainError::Validation(_)
            | DomainError::DuplicateEmail
            | DomainError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            DomainError::InvalidCredentials
            | DomainError::Unauthenticated
            | DomainError::InvalidToken
            | DomainError::FederationVerificationFailed => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Store(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
